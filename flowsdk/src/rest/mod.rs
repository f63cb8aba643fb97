pub mod endpoints;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{FlowError, Result};

/// HTTP client wrapper for JSON services.
#[derive(Debug, Clone)]
pub struct FlowHttpClient {
    client: Client,
    base_url: String,
}

impl FlowHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Share an existing connection pool.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET a JSON resource relative to the base URL.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let resp = self.client.get(&url).query(query).send().await?;
        Self::decode(resp).await
    }

    /// GET a JSON resource by absolute URL.
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let resp = self.client.get(url).send().await?;
        Self::decode(resp).await
    }

    /// POST a JSON body relative to the base URL.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(FlowError::Http {
                status,
                message: body,
            });
        }

        resp.json::<T>().await.map_err(FlowError::Request)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
