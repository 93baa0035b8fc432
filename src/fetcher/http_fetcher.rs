use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use crate::app::{BibliaError, Result};
use crate::fetcher::{FetchResponse, Fetcher};

pub const API_KEY_HEADER: &str = "api-key";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// `None` keeps reqwest's default of no overall request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("biblia/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &Url, api_key: &str) -> Result<FetchResponse> {
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| BibliaError::Config(format!("API key is not a valid header value: {}", e)))?;

        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, key)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchResponse { status, body })
    }
}
