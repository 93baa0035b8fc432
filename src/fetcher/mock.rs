//! In-memory fetcher for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use url::Url;

use crate::app::Result;
use crate::fetcher::{FetchResponse, Fetcher};

#[derive(Default)]
pub struct MockFetcher {
    routes: Mutex<Vec<(String, FetchResponse)>>,
    gates: Mutex<Vec<(String, Arc<Notify>)>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every URL containing `fragment` with `status` and `body`.
    pub fn route(self, fragment: &str, status: u16, body: &str) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((fragment.to_string(), FetchResponse::new(status, body)));
        self
    }

    /// Hold responses for URLs containing `fragment` until the returned
    /// handle is notified.
    pub fn gate(&self, fragment: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .push((fragment.to_string(), notify.clone()));
        notify
    }

    /// Requested `(url, api_key)` pairs in call order.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn get(&self, url: &Url, api_key: &str) -> Result<FetchResponse> {
        let url = url.to_string();
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), api_key.to_string()));

        let gate = self
            .gates
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, notify)| notify.clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let response = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| FetchResponse::new(404, "no route"));

        Ok(response)
    }
}
