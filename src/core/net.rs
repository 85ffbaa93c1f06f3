// src/core/net.rs
// Blocking HTTP GET with a fixed identity header and timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, ScrapeError};

/// Anything that can turn a URL into a page body.
/// The orchestrator only talks to this, so tests can serve fixtures from memory.
pub trait Fetch {
    fn get(&self, url: &Url) -> Result<String>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &Url) -> Result<String> {
        (**self).get(url)
    }
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &Url) -> Result<String> {
        debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        // Decodes with the charset the server declares
        Ok(resp.text()?)
    }
}
