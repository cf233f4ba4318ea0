//! Blocking HTTP client wrapper around reqwest.
//!
//! Oracle clients only need "POST JSON, read the whole body" with a bounded
//! timeout, so this wrapper exposes exactly that and folds every transport
//! failure into [`Error::Transport`].

use crate::error::{Error, Result};
use std::time::Duration;

const USER_AGENT: &str = concat!("intent-bench/", env!("CARGO_PKG_VERSION"));

/// A configured HTTP client.
#[derive(Debug, Clone)]
pub struct Client {
    inner: reqwest::blocking::Client,
}

impl Client {
    /// Create a client whose requests fail after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let inner = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { inner })
    }

    /// Create a POST request builder.
    pub fn post(&self, url: &str) -> RequestBuilder {
        RequestBuilder {
            inner: self.inner.post(url),
            url: url.to_string(),
        }
    }
}

/// HTTP request builder.
pub struct RequestBuilder {
    inner: reqwest::blocking::RequestBuilder,
    url: String,
}

impl RequestBuilder {
    /// Add a header to the request.
    #[must_use]
    pub fn header(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.inner = self.inner.header(key, value.as_ref());
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, json: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(json)?;
        self.inner = self
            .inner
            .header("Content-Type", "application/json")
            .body(bytes);
        Ok(self)
    }

    /// Send the request and read the full response body.
    pub fn send(self) -> Result<Response> {
        let response = self.inner.send().map_err(|e| {
            let kind = if e.is_timeout() { "timed out" } else { "failed" };
            Error::transport(format!("POST {} {kind}: {e}", self.url))
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::transport(format!("reading body from {}: {e}", self.url)))?;
        Ok(Response { status, body })
    }
}

/// HTTP response with its body already read.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: String,
}

impl Response {
    pub const fn status(&self) -> u16 {
        self.status
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn into_text(self) -> String {
        self.body
    }
}
