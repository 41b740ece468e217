//! Set RPC Client
//!
//! Thin `reqwest` wrapper over the JSON endpoints in [`super::protocol`].

use anyhow::Result;
use std::time::Duration;

use super::protocol::{
    ENDPOINT_ADD, ENDPOINT_CONTAINS, ENDPOINT_PEERS, ENDPOINT_REMOVE, Item, Response,
};
use crate::membership::types::Member;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct SetClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl SetClient {
    /// `base_url` is the node's address, with or without the `http://` scheme.
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        Self {
            base_url,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn add(&self, item: &str) -> Result<Response> {
        self.call(ENDPOINT_ADD, item).await
    }

    pub async fn remove(&self, item: &str) -> Result<Response> {
        self.call(ENDPOINT_REMOVE, item).await
    }

    pub async fn contains(&self, item: &str) -> Result<Response> {
        self.call(ENDPOINT_CONTAINS, item).await
    }

    pub async fn peers(&self) -> Result<Vec<Member>> {
        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, ENDPOINT_PEERS))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Peers request failed {}", response.status()));
        }

        Ok(response.json().await?)
    }

    async fn call(&self, endpoint: &str, item: &str) -> Result<Response> {
        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, endpoint))
            .json(&Item::new(item))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("{} failed {}", endpoint, response.status()));
        }

        Ok(response.json().await?)
    }
}
