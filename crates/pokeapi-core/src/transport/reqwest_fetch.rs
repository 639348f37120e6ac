//! Default fetcher backed by `reqwest`.

use async_trait::async_trait;

use super::fetch::{Fetch, FetchError, FetchRequest, FetchResponse};

/// [`Fetch`] implementation over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(FetchError::request)?;
        Ok(Self { client })
    }

    /// Reuse an existing client (proxy, TLS, pool settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetch for ReqwestFetcher {
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, FetchError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(FetchError::request)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(FetchError::body);

        Ok(FetchResponse {
            status,
            headers,
            body,
        })
    }
}
