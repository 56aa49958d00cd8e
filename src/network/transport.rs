//! Transport capability - the only place requests touch the network

use std::collections::BTreeMap;
use std::future::Future;

use crate::models::HttpMethod;

/// A fully resolved request ready to go on the wire
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Status line and headers, available before the body has been read
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponseHead {
    pub status: u16,
    /// Header pairs in the order the transport saw them; keys may repeat
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    pub fn with_body(self, body: Vec<u8>) -> TransportResponse {
        TransportResponse {
            status: self.status,
            headers: self.headers,
            body,
        }
    }
}

/// Complete response: head plus the fully read body
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Header pairs in the order the transport saw them; keys may repeat
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Last `content-type` value, matched case-insensitively
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

/// Transport failure (DNS, connect, TLS, malformed request...)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
        }
    }
}

/// Sends requests in two steps: `send` resolves once the status and headers
/// have arrived, `read_body` drains the rest.
///
/// There is no timeout and no cancellation: each future resolves when the
/// underlying transport resolves or fails.
pub trait Transport: Send + Sync {
    /// Handle to a body that has not been read yet
    type Body: Send + 'static;

    fn send(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<(ResponseHead, Self::Body), TransportError>> + Send;

    fn read_body(
        &self,
        body: Self::Body,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Production transport backed by a shared `reqwest::Client`
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        ReqwestTransport {
            client: create_client(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    type Body = reqwest::Response;

    fn send(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<(ResponseHead, Self::Body), TransportError>> + Send {
        let client = self.client.clone();
        async move {
            let method = match request.method {
                HttpMethod::GET => reqwest::Method::GET,
                HttpMethod::POST => reqwest::Method::POST,
                HttpMethod::PUT => reqwest::Method::PUT,
                HttpMethod::DELETE => reqwest::Method::DELETE,
            };

            // Invalid URLs and header names are reported by send(), not here
            let mut req_builder = client.request(method, &request.url);
            for (key, value) in &request.headers {
                req_builder = req_builder.header(key, value);
            }
            if let Some(body) = request.body {
                req_builder = req_builder.body(body);
            }

            let resp = req_builder.send().await.map_err(describe_error)?;
            let head = ResponseHead {
                status: resp.status().as_u16(),
                headers: resp
                    .headers()
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.as_str().to_string(),
                            String::from_utf8_lossy(value.as_bytes()).into_owned(),
                        )
                    })
                    .collect(),
            };

            Ok((head, resp))
        }
    }

    fn read_body(
        &self,
        body: Self::Body,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send {
        async move {
            body.bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| TransportError::new(format!("Error reading body: {}", e)))
        }
    }
}

fn describe_error(e: reqwest::Error) -> TransportError {
    let msg = if e.is_builder() {
        format!("Invalid request: {}", e)
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    TransportError::new(msg)
}

/// Create an HTTP client with default configuration (no timeout)
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
