use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use super::{
    parse_accounts, parse_performance, AccountClient, AccountIdentifier, AccountList, Credentials,
    PerformanceMetrics,
};
use crate::error::FetchError;

/// Production endpoint of the Indexa Capital API
pub const DEFAULT_API_URL: &str = "https://api.indexacapital.com";

const AUTH_HEADER: &str = "X-AUTH-TOKEN";

/// HTTP client for the Indexa Capital API
#[derive(Debug, Clone)]
pub struct IndexaClient {
    http: Client,
    base_url: String,
}

impl IndexaClient {
    /// Build a client for `base_url`, optionally bounding every request by `timeout`
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent("Mozilla/5.0 (compatible; InbotBot/1.0)");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, credentials: &Credentials, path: &str) -> Result<String, FetchError> {
        if credentials.is_empty() {
            return Err(FetchError::Authentication("no API token configured".to_string()));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, credentials.token())
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status, path));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("reading {} response failed: {}", path, e)))
    }
}

/// Map a non-success HTTP status onto the fetch error taxonomy
pub fn classify_status(status: StatusCode, path: &str) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FetchError::Authentication(format!("{} rejected the API token ({})", path, status))
        }
        StatusCode::NOT_FOUND => FetchError::Upstream(format!("{} not found", path)),
        _ => FetchError::Upstream(format!("{} returned error status: {}", path, status)),
    }
}

impl AccountClient for IndexaClient {
    async fn identify(&self, credentials: &Credentials) -> Result<AccountList, FetchError> {
        info!("Fetching accounts from Indexa Capital");
        let body = self.get(credentials, "/users/me").await?;
        let accounts = parse_accounts(&body)?;
        debug!("Indexa Capital returned {} accounts", accounts.len());
        Ok(accounts)
    }

    async fn fetch_performance(
        &self,
        credentials: &Credentials,
        account: &AccountIdentifier,
    ) -> Result<PerformanceMetrics, FetchError> {
        info!("Fetching performance for account {} from Indexa Capital", account);
        let path = format!("/accounts/{}/performance", account);
        let body = self.get(credentials, &path).await?;
        parse_performance(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve `responses` one connection each on 127.0.0.1, recording request heads
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let server = tokio::spawn(async move {
            let mut heads = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut request: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                heads.push(String::from_utf8_lossy(&request).into_owned());

                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            heads
        });

        (url, server)
    }

    const ME_JSON: &str =
        r#"{"username":"x","accounts":[{"account_number":"AAAA1111"},{"account_number":"BBBB2222"}]}"#;

    const PERFORMANCE_JSON: &str = r#"{"return":{"time_return":0.08,"time_return_annual":0.05,"money_return":0.07,"money_return_annual":0.04,"investment":1000,"pl":50.5,"total_amount":1050.5},"volatility":0.12}"#;

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "/users/me"),
            FetchError::Authentication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "/users/me"),
            FetchError::Authentication(_)
        ));

        let not_found = classify_status(StatusCode::NOT_FOUND, "/accounts/X/performance");
        assert_eq!(
            not_found,
            FetchError::Upstream("/accounts/X/performance not found".to_string())
        );

        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, "/users/me"),
            FetchError::Upstream(_)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = IndexaClient::new("https://example.test/", None).unwrap();
        assert_eq!(client.base_url(), "https://example.test");
    }

    #[tokio::test]
    async fn test_empty_token_fails_before_any_request() {
        // Unroutable URL: reaching the network would yield a Network error instead
        let client = IndexaClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client.identify(&Credentials::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client =
            IndexaClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = client
            .identify(&Credentials::new("token"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_identify_then_fetch_performance_over_http() {
        let (url, server) = serve(vec![(200, ME_JSON), (200, PERFORMANCE_JSON)]).await;
        let client = IndexaClient::new(&url, Some(Duration::from_secs(5))).unwrap();
        let creds = Credentials::new("secret-token");

        let accounts = client.identify(&creds).await.unwrap();
        assert_eq!(
            accounts,
            vec![
                AccountIdentifier::new("AAAA1111"),
                AccountIdentifier::new("BBBB2222")
            ]
        );

        let metrics = client.fetch_performance(&creds, &accounts[0]).await.unwrap();
        assert_eq!(metrics.time_return, 0.08);
        assert_eq!(metrics.money_return_annual, 0.04);
        assert_eq!(metrics.investment, rust_decimal::Decimal::from(1000));
        assert_eq!(metrics.profit_loss, rust_decimal::Decimal::new(505, 1));
        assert_eq!(metrics.total_amount, rust_decimal::Decimal::new(10505, 1));
        assert_eq!(metrics.volatility, 0.12);

        let heads = server.await.unwrap();
        assert!(heads[0].starts_with("GET /users/me HTTP/1.1\r\n"), "{}", heads[0]);
        assert!(
            heads[1].starts_with("GET /accounts/AAAA1111/performance HTTP/1.1\r\n"),
            "{}",
            heads[1]
        );
        for head in &heads {
            assert!(
                head.to_ascii_lowercase().contains("x-auth-token: secret-token\r\n"),
                "{}",
                head
            );
        }
    }

    #[tokio::test]
    async fn test_served_401_is_authentication_error() {
        let (url, server) = serve(vec![(401, r#"{"message":"Unauthorized"}"#)]).await;
        let client = IndexaClient::new(&url, Some(Duration::from_secs(5))).unwrap();

        let err = client
            .identify(&Credentials::new("expired"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Authentication(_)), "{:?}", err);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_served_garbage_is_upstream_error() {
        let (url, server) = serve(vec![(200, "<html>maintenance</html>")]).await;
        let client = IndexaClient::new(&url, Some(Duration::from_secs(5))).unwrap();

        let err = client
            .fetch_performance(&Credentials::new("t"), &AccountIdentifier::new("AAAA1111"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Upstream(_)), "{:?}", err);
        server.await.unwrap();
    }
}
