//! Indexa Capital account API
//!
//! `AccountClient` is the seam between the fetch pipeline and the brokerage:
//! one call to list the accounts behind a token, one to read the performance
//! of an account. `IndexaClient` is the HTTP implementation.

pub mod client;

use std::fmt;
use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub use client::{IndexaClient, DEFAULT_API_URL};

/// API token used to authenticate against the brokerage
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Credentials(<empty>)")
        } else {
            write!(f, "Credentials(<redacted>)")
        }
    }
}

/// Account number as returned by the brokerage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentifier(String);

impl AccountIdentifier {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accounts behind a token, in the order the brokerage lists them
pub type AccountList = Vec<AccountIdentifier>;

/// Performance snapshot of one account.
///
/// Returns and volatility are fractions (0.08 = 8%); amounts are in euros.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub time_return: f64,
    pub time_return_annual: f64,
    pub money_return: f64,
    pub money_return_annual: f64,
    pub investment: Decimal,
    pub profit_loss: Decimal,
    pub total_amount: Decimal,
    pub volatility: f64,
}

/// Brokerage operations the fetch pipeline depends on
pub trait AccountClient {
    /// List the accounts the credentials give access to
    fn identify(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AccountList, FetchError>> + Send;

    /// Read the performance snapshot of one account
    fn fetch_performance(
        &self,
        credentials: &Credentials,
        account: &AccountIdentifier,
    ) -> impl Future<Output = Result<PerformanceMetrics, FetchError>> + Send;
}

/// `/users/me` response
#[derive(Debug, Deserialize)]
struct MeResponse {
    #[serde(default)]
    accounts: Vec<MeAccount>,
}

#[derive(Debug, Deserialize)]
struct MeAccount {
    account_number: String,
}

/// `/accounts/{n}/performance` response
#[derive(Debug, Deserialize)]
struct PerformanceResponse {
    #[serde(rename = "return")]
    returns: ReturnData,
    volatility: f64,
}

#[derive(Debug, Deserialize)]
struct ReturnData {
    time_return: f64,
    time_return_annual: f64,
    money_return: f64,
    money_return_annual: f64,
    investment: Decimal,
    pl: Decimal,
    total_amount: Decimal,
}

impl From<PerformanceResponse> for PerformanceMetrics {
    fn from(p: PerformanceResponse) -> Self {
        PerformanceMetrics {
            time_return: p.returns.time_return,
            time_return_annual: p.returns.time_return_annual,
            money_return: p.returns.money_return,
            money_return_annual: p.returns.money_return_annual,
            investment: p.returns.investment,
            profit_loss: p.returns.pl,
            total_amount: p.returns.total_amount,
            volatility: p.volatility,
        }
    }
}

/// Parse a `/users/me` document into the ordered account list
pub fn parse_accounts(body: &str) -> Result<AccountList, FetchError> {
    let me: MeResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Upstream(format!("invalid accounts response: {}", e)))?;

    Ok(me
        .accounts
        .into_iter()
        .map(|a| AccountIdentifier(a.account_number))
        .collect())
}

/// Parse a `/accounts/{n}/performance` document
pub fn parse_performance(body: &str) -> Result<PerformanceMetrics, FetchError> {
    let perf: PerformanceResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Upstream(format!("invalid performance response: {}", e)))?;

    Ok(perf.into())
}
