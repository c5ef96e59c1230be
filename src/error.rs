//! Error handling for inbot
//!
//! Defines the failure taxonomy of the fetch pipeline and establishes a
//! unified Result type using anyhow for the bootstrap and CLI paths.

use std::fmt;

use thiserror::Error;

/// Failures of a single upstream call against the brokerage API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("no account found for these credentials")]
    AccountNotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("invocation cancelled")]
    Cancelled,

    #[error("invocation deadline exceeded")]
    DeadlineExceeded,
}

impl FetchError {
    /// Stable, machine-friendly name of the error kind (used in log fields)
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Authentication(_) => "authentication",
            FetchError::AccountNotFound => "account_not_found",
            FetchError::Network(_) => "network",
            FetchError::Upstream(_) => "upstream",
            FetchError::Cancelled => "cancelled",
            FetchError::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

/// Step of the fetch pipeline a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Identify,
    FetchPerformance,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Identify => write!(f, "identify"),
            FetchStage::FetchPerformance => write!(f, "fetch_performance"),
        }
    }
}

/// A fetch error together with the stage that produced it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed: {error}")]
pub struct FetchFailure {
    pub stage: FetchStage,
    #[source]
    pub error: FetchError,
}

impl FetchFailure {
    pub fn new(stage: FetchStage, error: FetchError) -> Self {
        Self { stage, error }
    }
}

/// Serializing a rendered message failed
#[derive(Error, Debug)]
#[error("formatting error: {0}")]
pub struct FormattingError(#[from] serde_json::Error);

/// Result type alias for bootstrap and CLI operations
pub type Result<T> = anyhow::Result<T>;
