// src/services/transport.rs
// DOCUMENTATION: HTTP transport used by the Places API client
// PURPOSE: Issue GET requests and hand back raw bytes or a typed failure

use crate::config::Config;
use crate::errors::PlacesError;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use std::num::NonZeroU32;
use std::time::Duration;

/// Issues GET requests for the Places API client
/// DOCUMENTATION: Implementations must map failures onto PlacesError
/// - builder/URL problems -> InvalidRequest
/// - connectivity and timeouts -> TransportFailure
/// - non-2xx status -> ServerError
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>, PlacesError>;
}

/// reqwest-backed transport with a client-side request quota
pub struct ReqwestTransport {
    client: Client,
    limiter: DefaultDirectRateLimiter,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, requests_per_second: u32) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("find-places/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlacesError::InvalidRequest(format!("HTTP client setup failed: {}", e)))?;

        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            config.requests_per_second,
        )
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Vec<u8>, PlacesError> {
        self.limiter.until_ready().await;

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Places API error {}: {}", status, body);
            return Err(PlacesError::server(status.as_u16().to_string(), body));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

// Request URLs carry the API key, strip them before logging
fn map_reqwest_error(e: reqwest::Error) -> PlacesError {
    let e = e.without_url();
    log::error!("Places API request failed: {}", e);

    if e.is_builder() {
        PlacesError::InvalidRequest(e.to_string())
    } else if e.is_timeout() {
        PlacesError::TransportFailure(format!("Request timed out: {}", e))
    } else {
        PlacesError::TransportFailure(format!("Request failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    // Serves exactly one canned HTTP response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/nearbysearch/json", addr)
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"results":[]}"#).await;
        let transport = ReqwestTransport::new(Duration::from_secs(5), 10).unwrap();

        let body = transport
            .get(&url, &[("key", "test_key".to_string())])
            .await
            .unwrap();

        assert_eq!(body, br#"{"results":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn test_non_success_is_server_error() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "busy").await;
        let transport = ReqwestTransport::new(Duration::from_secs(5), 10).unwrap();

        let err = transport.get(&url, &[]).await.unwrap_err();

        assert_eq!(err, PlacesError::server("503", "busy"));
    }

    #[tokio::test]
    async fn test_unreachable_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(5), 10).unwrap();
        let err = transport
            .get(&format!("http://{}/details/json", addr), &[])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "TRANSPORT_FAILURE");
    }
}
