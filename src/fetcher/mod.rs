pub mod http_fetcher;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

/// Raw outcome of a GET: any status is a successful fetch at this layer.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait Fetcher {
    /// Perform one GET against `url` with the `api-key` header set.
    ///
    /// Only transport failures are errors; status classification is left to
    /// the caller.
    async fn get(&self, url: &Url, api_key: &str) -> Result<FetchResponse>;
}
