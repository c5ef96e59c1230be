//! Per-trigger invocation context
//!
//! Carries the execution deadline and the cancellation signal of one trigger
//! event so the upstream calls made on its behalf stop when the trigger does.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::error::FetchError;

/// Handle used by the trigger side to cancel an in-flight invocation
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Invocation {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Invocation {
    /// Invocation bounded by nothing but the host
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Attach a cancellation signal, returning the handle that fires it
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle(tx))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Drive `call` unless the invocation is cancelled or its deadline passes first.
    ///
    /// The pending call is dropped in either case.
    pub async fn run<T, F>(&self, call: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        if self.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        let cancelled = async {
            match self.cancel.clone() {
                Some(mut rx) => {
                    let handle_dropped = rx.wait_for(|cancelled| *cancelled).await.is_err();
                    // A dropped handle can no longer cancel
                    if handle_dropped {
                        std::future::pending::<()>().await;
                    }
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = call => result,
            _ = deadline => Err(FetchError::DeadlineExceeded),
            _ = cancelled => Err(FetchError::Cancelled),
        }
    }
}
