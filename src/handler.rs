//! Trigger entry point
//!
//! `Handler::handle` is what the HTTP trigger calls. It never fails: a fetch
//! failure becomes a bare 500, the details go to the log only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::FormattingError;
use crate::indexa::{AccountClient, Credentials};
use crate::invocation::Invocation;
use crate::performance::PerformanceFetcher;
use crate::render::{render, MessagePayload};

/// Proxy response in the shape HTTP triggers (API Gateway, Lambda URLs) expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    pub fn json(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code: 200,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    /// Undifferentiated failure: no headers, no body
    pub fn internal_error() -> Self {
        Self {
            status_code: 500,
            headers: BTreeMap::new(),
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

pub struct Handler<C> {
    fetcher: PerformanceFetcher<C>,
    credentials: Credentials,
}

impl<C: AccountClient> Handler<C> {
    pub fn new(client: C, credentials: Credentials) -> Self {
        Self {
            fetcher: PerformanceFetcher::new(client),
            credentials,
        }
    }

    pub async fn handle(&self, invocation: &Invocation) -> HttpResponse {
        let metrics = match self
            .fetcher
            .get_performance(&self.credentials, invocation)
            .await
        {
            Ok(metrics) => metrics,
            Err(failure) => {
                warn!(
                    stage = %failure.stage,
                    kind = failure.error.kind(),
                    "Performance fetch failed: {}",
                    failure.error
                );
                return HttpResponse::internal_error();
            }
        };

        match serialize(&render(&metrics)) {
            Ok(body) => {
                info!("Rendered performance message ({} bytes)", body.len());
                HttpResponse::json(body)
            }
            Err(e) => {
                error!("{}", e);
                HttpResponse::internal_error()
            }
        }
    }
}

fn serialize(payload: &MessagePayload) -> Result<String, FormattingError> {
    Ok(serde_json::to_string(payload)?)
}
