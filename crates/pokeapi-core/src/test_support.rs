//! In-process fetcher for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::transport::{Fetch, FetchError, FetchRequest, FetchResponse, Transport};

/// Serves fixed `(status, body)` pairs by exact URL; unknown URLs get 404.
/// Records every requested URL in order.
pub(crate) struct RouteFetcher {
    routes: HashMap<String, (u16, String)>,
    seen: Mutex<Vec<String>>,
}

impl RouteFetcher {
    pub(crate) fn new(routes: &[(&str, u16, &str)]) -> Arc<Self> {
        Arc::new(Self {
            routes: routes
                .iter()
                .map(|(url, status, body)| (url.to_string(), (*status, body.to_string())))
                .collect(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetch for RouteFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        self.seen.lock().unwrap().push(request.url.clone());
        let (status, body) = self
            .routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| (404, "Not Found".to_string()));
        Ok(FetchResponse::new(status, body))
    }
}

/// Single-attempt transport over `fetcher` with base URL `http://api.test`.
pub(crate) fn transport(fetcher: &Arc<RouteFetcher>) -> Transport {
    Transport::builder()
        .base_url("http://api.test")
        .attempts(1)
        .fetcher(fetcher.clone())
        .build()
        .unwrap()
}
