use crate::core::errors::AnyPayError;
use crate::core::types::{HttpMethod, Params};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests
///
/// This is the transport seam of the crate: the API client hands over a
/// fully signed parameter set and gets back the decoded JSON body. Tests
/// plug in their own implementation to serve canned responses.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Perform exactly one HTTP exchange
    ///
    /// # Arguments
    /// * `method` - `GET` sends `params` as the query string, `POST` as a form body
    /// * `endpoint` - Path relative to the configured base URL
    /// * `params` - Final parameters, signature included
    ///
    /// # Returns
    /// The response body decoded as JSON
    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<Value, AnyPayError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_seconds: crate::core::config::DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("anypay-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, AnyPayError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                AnyPayError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a new `ReqwestRest` with default settings
    pub fn new(base_url: String) -> Result<Self, AnyPayError> {
        RestClientBuilder::new(RestClientConfig::new(base_url)).build()
    }

    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Handle the response and extract JSON
    #[instrument(skip(self, response), fields(provider = "anypay", status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, AnyPayError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AnyPayError::Transport(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                AnyPayError::Transport(format!("Response body is not JSON: {}", e))
            })
        } else {
            Err(AnyPayError::Http {
                status: status.as_u16(),
                body: response_text,
            })
        }
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    // The parameter set carries the signature, keep it out of the span
    #[instrument(skip(self, params), fields(provider = "anypay", method = %method, param_count = params.len()))]
    async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &Params,
    ) -> Result<Value, AnyPayError> {
        let url = self.build_url(endpoint);
        let pairs = params.as_pairs();

        let request = match method {
            HttpMethod::Get => self.client.get(&url).query(&pairs),
            HttpMethod::Post => self.client.post(&url).form(&pairs),
        };

        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AnyPayError::Transport(format!("Request failed: {}", e)))?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on a local port and hand back the raw request
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            while !request_complete(&raw) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(raw).unwrap()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn local_rest(base_url: String) -> ReqwestRest {
        RestClientBuilder::new(RestClientConfig::new(base_url).with_timeout(5))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let (base_url, server) = serve_once("502 Bad Gateway", "upstream down").await;

        let mut params = Params::new();
        params.push("project_id", 7u64);
        params.push("sign", "abc");
        let err = local_rest(base_url)
            .send(HttpMethod::Get, "/payments/1234", &params)
            .await
            .unwrap_err();

        match err {
            AnyPayError::Http { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /payments/1234?project_id=7&sign=abc HTTP/1.1\r\n"),
            "{request}"
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let (base_url, server) = serve_once("200 OK", "not json").await;

        let mut params = Params::new();
        params.push("project_id", 7u64);
        params.push("desc", "Order 1001");
        let err = local_rest(base_url)
            .send(HttpMethod::Post, "/create-payment/1234", &params)
            .await
            .unwrap_err();

        assert!(matches!(err, AnyPayError::Transport(_)), "{err:?}");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("POST /create-payment/1234 HTTP/1.1\r\n"),
            "{request}"
        );
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("\r\n\r\nproject_id=7&desc=Order+1001"), "{request}");
    }

    #[tokio::test]
    async fn test_json_body_is_returned() {
        let (base_url, server) = serve_once("200 OK", r#"{"result":{"balance":"10.00"}}"#).await;

        let body = local_rest(base_url)
            .send(HttpMethod::Get, "/balance/1234", &Params::new())
            .await
            .unwrap();

        assert_eq!(body["result"]["balance"], "10.00");
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /balance/1234 HTTP/1.1\r\n"), "{request}");
    }

    #[test]
    fn test_rest_client_creation() {
        let rest = ReqwestRest::new("https://anypay.io/api".to_string()).unwrap();
        assert_eq!(rest.config().timeout_seconds, 60);
        assert_eq!(
            rest.build_url("/balance/1234"),
            "https://anypay.io/api/balance/1234"
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = RestClientConfig::new("http://localhost".to_string())
            .with_timeout(5)
            .with_user_agent("custom/1.0".to_string());
        let rest = RestClientBuilder::new(config).build().unwrap();

        assert_eq!(rest.config().timeout_seconds, 5);
        assert_eq!(rest.config().user_agent, "custom/1.0");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let rest = RestClientBuilder::new(
            RestClientConfig::new("http://127.0.0.1:9".to_string()).with_timeout(2),
        )
        .build()
        .unwrap();

        let err = rest
            .send(HttpMethod::Get, "/balance/1", &Params::new())
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }
}
