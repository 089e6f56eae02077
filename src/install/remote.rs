//! Remote installer download.
//!
//! Installer scripts are fetched over HTTPS with a bounded client timeout,
//! written to a private temp file, and only then handed to an interpreter
//! under the command timeout. Nothing is piped straight from the network
//! into a shell.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{RigupError, Result};

/// Source of installer scripts.
pub trait Fetcher {
    /// Download the script at `url` and return its body.
    fn fetch_script(&self, url: &str) -> Result<String>;
}

/// Fetches scripts over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rigup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RigupError::Other(e.into()))?;
        Ok(Self { client, timeout })
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_script(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let failed = |message: String| RigupError::DownloadFailed {
            url: url.to_string(),
            message,
        };

        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                failed(format!("timed out after {}s", self.timeout.as_secs()))
            } else {
                failed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status)));
        }

        let body = response.text().map_err(|e| failed(e.to_string()))?;
        if body.trim().is_empty() {
            return Err(failed("empty response".to_string()));
        }
        Ok(body)
    }
}

/// Serves canned scripts; for tests and dry runs.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    scripts: HashMap<String, String>,
}

impl StaticFetcher {
    /// A fetcher with no scripts (every fetch fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script body for `url`.
    pub fn with_script(mut self, url: &str, body: &str) -> Self {
        self.scripts.insert(url.to_string(), body.to_string());
        self
    }
}

impl Fetcher for StaticFetcher {
    fn fetch_script(&self, url: &str) -> Result<String> {
        self.scripts
            .get(url)
            .cloned()
            .ok_or_else(|| RigupError::DownloadFailed {
                url: url.to_string(),
                message: "HTTP 404 Not Found".to_string(),
            })
    }
}
