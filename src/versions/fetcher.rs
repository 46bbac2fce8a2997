//! JSON-over-HTTP fetching.
//!
//! Provides the [`JsonFetcher`] capability used by the version client, an
//! HTTP implementation with a bounded per-request timeout, and a static
//! implementation for tests.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability to GET a URL and decode the body as JSON.
pub trait JsonFetcher {
    /// Fetch `url` and parse the response body.
    ///
    /// Non-2xx statuses are errors.
    fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Fetches JSON documents over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with the default 10-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("stackpulse/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl JsonFetcher for HttpFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .json::<Value>()
            .with_context(|| format!("Invalid JSON from {}", url))
    }
}

/// Fetcher that serves canned documents keyed by URL.
///
/// URLs with no document fail like an unreachable host. Every request is
/// recorded.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    documents: HashMap<String, Value>,
    requests: RefCell<Vec<String>>,
}

impl StaticFetcher {
    /// Create a fetcher with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `url`.
    pub fn with(mut self, url: &str, document: Value) -> Self {
        self.documents.insert(url.to_string(), document);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl JsonFetcher for StaticFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value> {
        self.requests.borrow_mut().push(url.to_string());
        match self.documents.get(url) {
            Some(document) => Ok(document.clone()),
            None => bail!("no route to {}", url),
        }
    }
}
