/// Homework status API client
///
/// One GET per poll cycle, no retries: the poll loop's sleep-and-repeat is the
/// retry policy.
use crate::config::ApiConfig;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Header text used in diagnostics; the token itself never leaves the client
const REDACTED_HEADERS: &str = "Authorization: OAuth ***";

/// Anything that can answer "which homework changed since `from_date`"
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    async fn fetch(&self, from_date: i64) -> BotResult<Value>;
}

pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(api: &ApiConfig, token: &str) -> BotResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(api.request_timeout_secs))
            .user_agent(concat!("homework-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BotError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: api.endpoint.clone(),
            token: token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Transport failure with its full "outer: inner: root" cause chain
    fn unavailable(&self, timestamp: i64, error: reqwest::Error) -> BotError {
        BotError::EndpointUnavailable {
            endpoint: self.endpoint.clone(),
            headers: REDACTED_HEADERS.to_string(),
            timestamp,
            reason: format!("{:#}", anyhow::Error::from(error)),
        }
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> BotResult<Value> {
        logger::debug(
            LogTag::Api,
            &format!("GET {} from_date={}", self.endpoint, from_date),
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| self.unavailable(from_date, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::HttpStatus {
                endpoint: self.endpoint.clone(),
                headers: REDACTED_HEADERS.to_string(),
                timestamp: from_date,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.unavailable(from_date, e))?;
        logger::verbose(LogTag::Api, &format!("Response body: {}", body));

        serde_json::from_str(&body).map_err(|e| BotError::InvalidJson(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const PATH: &str = "/api/user_api/homework_statuses/";

    /// Serve one canned HTTP response; the handle yields the raw request head
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}{}", addr, PATH), handle)
    }

    fn client_for(endpoint: String) -> PracticumClient {
        // Loopback stubs must not be routed through an ambient HTTP_PROXY
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        PracticumClient {
            client,
            endpoint,
            token: "test-token".to_string(),
        }
    }

    #[test]
    fn test_new_uses_configured_endpoint() {
        let client = PracticumClient::new(&ApiConfig::default(), "test-token").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://practicum.yandex.ru/api/user_api/homework_statuses/"
        );
    }

    #[tokio::test]
    async fn test_fetch_ok_sends_auth_and_from_date() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"homeworks":[],"current_date":1000}"#).await;
        let client = client_for(endpoint);

        let body = client.fetch(1000).await.unwrap();
        assert_eq!(body["current_date"], 1000);

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with(&format!("get {}?from_date=1000 ", PATH)));
        assert!(request.contains("authorization: oauth test-token"));
    }

    #[tokio::test]
    async fn test_non_200_is_protocol_error() {
        let (endpoint, server) = serve_once("503 Service Unavailable", "{}").await;
        let client = client_for(endpoint.clone());

        let err = client.fetch(1000).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.kind(), ErrorKind::Protocol);
        match &err {
            BotError::HttpStatus { status, timestamp, endpoint: e, .. } => {
                assert_eq!(*status, 503);
                assert_eq!(*timestamp, 1000);
                assert_eq!(e, &endpoint);
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
        assert!(!err.to_string().contains("test-token"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}{}", addr, PATH));
        let err = client.fetch(42).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        match &err {
            BotError::EndpointUnavailable { reason, .. } => {
                // Outer reqwest message plus the connect cause beneath it
                assert!(reason.starts_with("error sending request"));
                assert!(reason.contains("connect"));
            }
            other => panic!("expected EndpointUnavailable, got {:?}", other),
        }
        let text = err.to_string();
        assert!(text.contains("from_date: 42"));
        assert!(text.contains(REDACTED_HEADERS));
        assert!(!text.contains("test-token"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_shape_error() {
        let (endpoint, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = client_for(endpoint);

        let err = client.fetch(1000).await.unwrap_err();
        server.await.unwrap();
        assert!(matches!(err, BotError::InvalidJson(_)));
    }
}
