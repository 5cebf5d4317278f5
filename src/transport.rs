//! The HTTP request seam the measurement engine is built on.
//!
//! Every phase of a test boils down to issuing plain GET or form POST
//! requests and timing them. The engine depends on the [`Transport`] trait
//! rather than on a concrete client so tests can substitute deterministic
//! timings without network I/O.

use std::future::Future;
use std::time::Duration;

use crate::error::{Result, SpeedtestError};

/// Issues the raw HTTP requests a measurement phase consists of.
///
/// Cancellation follows the usual async contract: dropping a returned future
/// abandons the request. Callers wanting a deadline wrap individual calls in
/// [`tokio::time::timeout`] or configure a client-level timeout with
/// [`HttpTransport::with_timeout`].
pub trait Transport {
    /// Issue a GET and drain the response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<()>> + Send;

    /// POST a URL-form-encoded body.
    fn post_form(&self, url: &str, body: String) -> impl Future<Output = Result<()>> + Send;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the crate's default user agent and no timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()?;
        Ok(HttpTransport { client })
    }

    /// Build a transport with a per-request timeout. A request exceeding the
    /// timeout fails like any other transport error and aborts its phase.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()?;
        Ok(HttpTransport { client })
    }

    /// Wrap an already-configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<()> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| SpeedtestError::Request { url: url.into(), source })?;
        check_status(url, response.status())?;
        // The transfer is the measurement; drain the body without buffering
        // the whole payload.
        while let Some(_chunk) = response
            .chunk()
            .await
            .map_err(|source| SpeedtestError::Request { url: url.into(), source })?
        {}
        Ok(())
    }

    async fn post_form(&self, url: &str, body: String) -> Result<()> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|source| SpeedtestError::Request { url: url.into(), source })?;
        check_status(url, response.status())
    }
}

fn check_status(url: &str, status: reqwest::StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(SpeedtestError::BadStatus { url: url.into(), status })
    }
}

/// Default user agent sent with every request.
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
