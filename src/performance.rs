//! Performance retrieval
//!
//! Resolves the account behind a token and reads its performance snapshot.
//! Fail-fast: no retries, the first failed call ends the invocation.

use tracing::{debug, info};

use crate::error::{FetchError, FetchFailure, FetchStage};
use crate::indexa::{AccountClient, Credentials, PerformanceMetrics};
use crate::invocation::Invocation;

pub struct PerformanceFetcher<C> {
    client: C,
}

impl<C: AccountClient> PerformanceFetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch the performance of the first account the credentials give access to
    pub async fn get_performance(
        &self,
        credentials: &Credentials,
        invocation: &Invocation,
    ) -> Result<PerformanceMetrics, FetchFailure> {
        let accounts = invocation
            .run(self.client.identify(credentials))
            .await
            .map_err(|e| FetchFailure::new(FetchStage::Identify, e))?;

        // Always the first listed account, whatever else is behind the token
        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| FetchFailure::new(FetchStage::Identify, FetchError::AccountNotFound))?;
        debug!("Selected account {}", account);

        let metrics = invocation
            .run(self.client.fetch_performance(credentials, &account))
            .await
            .map_err(|e| FetchFailure::new(FetchStage::FetchPerformance, e))?;

        info!("Loaded performance for account {}", account);
        Ok(metrics)
    }
}
