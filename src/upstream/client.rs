//! Character API client.

use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ProxyError, Result};

/// Read-only client for the character REST API.
///
/// Every request is bounded by the timeout given at construction.
#[derive(Debug, Clone)]
pub struct CharacterApi {
    base_url: String,
    client: reqwest::Client,
}

impl CharacterApi {
    /// Creates a client for the API rooted at `base_url`, e.g.
    /// `https://rickandmortyapi.com/api`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First page of all characters.
    pub async fn all_characters(&self) -> Result<Value> {
        let url = format!("{}/character", self.base_url);
        self.get_json(self.client.get(&url), &url).await
    }

    /// A single character by id.
    pub async fn character(&self, id: &str) -> Result<Value> {
        let url = format!("{}/character/{}", self.base_url, id);
        self.get_json(self.client.get(&url), &url).await
    }

    /// Characters whose name matches `name`. The name is sent as typed.
    pub async fn search(&self, name: &str) -> Result<Value> {
        let url = format!("{}/character/", self.base_url);
        let request = self.client.get(&url).query(&[("name", name)]);
        self.get_json(request, &url).await
    }

    async fn get_json(&self, request: reqwest::RequestBuilder, url: &str) -> Result<Value> {
        debug!(url, "Fetching from upstream");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::NotFound(format!("Upstream resource not found: {}", url)));
        }
        if !status.is_success() {
            warn!(url, %status, "Upstream returned an error status");
            return Err(ProxyError::Upstream(format!(
                "Request to {} failed with status {}",
                url, status
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}
