//! Cover list HTTP client.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::NetworkError;
use crate::domain::ports::ListSourcePort;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("mal-covers/", env!("CARGO_PKG_VERSION"));

/// Downloads cover lists over HTTP.
#[derive(Debug, Clone)]
pub struct HttpListClient {
    client: Client,
}

impl HttpListClient {
    /// Creates client with the default timeout and user agent.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, NetworkError> {
        Self::with_options(Some(DEFAULT_TIMEOUT), None)
    }

    /// Creates client with an optional timeout and user agent. Without a
    /// timeout, requests wait indefinitely.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_options(
        timeout: Option<Duration>,
        user_agent: Option<&str>,
    ) -> Result<Self, NetworkError> {
        let mut builder = Client::builder().user_agent(user_agent.unwrap_or(USER_AGENT));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| {
                NetworkError::transport("<client>", format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ListSourcePort for HttpListClient {
    async fn fetch_list(&self, url: &str) -> Result<String, NetworkError> {
        debug!(url, "Downloading cover list");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Failed to reach cover list");
            if e.is_timeout() {
                NetworkError::timeout(url)
            } else {
                NetworkError::transport(url, describe(&e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "Cover list request rejected");
            return Err(NetworkError::status(url, status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::timeout(url)
            } else {
                NetworkError::body(url, describe(&e))
            }
        })?;

        debug!(url, bytes = body.len(), "Downloaded cover list");
        Ok(body)
    }
}

/// Renders `error` followed by each of its causes.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned response per connection and returns the base URL.
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = stream.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {status_line}\r\nContent-Type: text/css\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        format!("http://{addr}/covers")
    }

    #[test]
    fn test_client_creation() {
        assert!(HttpListClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let body = r#".animetitle[href^="/anime/1/"]{background-image:url(/1.jpg)}"#;
        let url = serve("200 OK", body).await;

        let text = HttpListClient::new().unwrap().fetch_list(&url).await.unwrap();

        assert_eq!(text, body);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let url = serve("503 Service Unavailable", "busy").await;

        let err = HttpListClient::new().unwrap().fetch_list(&url).await.unwrap_err();

        assert!(matches!(err, NetworkError::Status { status: 503, .. }));
        assert_eq!(err.url(), url);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpListClient::with_options(Some(Duration::from_secs(2)), None).unwrap();
        let err = client
            .fetch_list(&format!("http://{addr}/covers"))
            .await
            .unwrap_err();

        assert!(err.is_transient());
        assert!(matches!(err, NetworkError::Transport { .. }));
        assert!(
            err.to_string().to_lowercase().contains("refused"),
            "connect cause missing: {err}"
        );
    }

    #[tokio::test]
    async fn test_without_timeout() {
        let body = r#".animetitle[href^="/manga/2/"]{background-image:url(/2.jpg)}"#;
        let url = serve("200 OK", body).await;

        let client = HttpListClient::with_options(None, Some("covers-test/1.0")).unwrap();

        assert_eq!(client.fetch_list(&url).await.unwrap(), body);
    }
}
