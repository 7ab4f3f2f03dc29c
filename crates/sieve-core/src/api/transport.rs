//! HTTP transport seam
//!
//! The API client only needs "GET this URL, give me status and body".
//! Keeping that behind a trait lets the client and pipeline run against
//! canned responses in tests.

use crate::error::{Result, SieveError};
use std::time::Duration;
use tracing::debug;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for blocking GET transports
pub trait Transport: Send + Sync {
    /// Issue a GET request and read the whole body
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Transport backed by a blocking reqwest client
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport; `None` disables the request timeout entirely
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("comment-sieve/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SieveError::Transport(e.without_url()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        // Request URLs carry the API key, so errors are stripped of them.
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SieveError::Transport(e.without_url()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SieveError::Transport(e.without_url()))?;
        debug!("HTTP {} ({} bytes)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StubServer;
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(403, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(None).is_ok());
        assert!(HttpTransport::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn test_http_transport_get() {
        let server = StubServer::start(vec![
            ("/ok", 200, r#"{"items":[]}"#.to_string()),
            ("/forbidden", 403, r#"{"error":{"message":"no"}}"#.to_string()),
        ]);
        let transport = HttpTransport::new(Some(Duration::from_secs(5))).unwrap();

        let ok = transport.get(&format!("{}/ok?key=k", server.base_url())).unwrap();
        assert_eq!(ok, HttpResponse::new(200, r#"{"items":[]}"#));

        // Non-2xx statuses are returned, not turned into transport errors.
        let denied = transport.get(&format!("{}/forbidden", server.base_url())).unwrap();
        assert_eq!(denied.status, 403);
        assert!(!denied.is_success());

        assert_eq!(server.requests(), vec!["/ok?key=k", "/forbidden"]);
    }

    #[test]
    fn test_http_transport_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(Some(Duration::from_secs(5))).unwrap();
        let err = transport
            .get(&format!("http://{}/videos?key=secret-key", addr))
            .unwrap_err();
        assert!(matches!(err, SieveError::Transport(_)));
        assert!(!err.to_string().contains("secret-key"));
    }
}
