//! Client for the product search service used to assemble candidate pools.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ProviderError;

/// One raw search result. `raw_text` carries whatever snippet text the
/// service returns; the quick scorer extracts signals from it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub price: Option<f64>,
    pub link: Option<String>,
    pub raw_text: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, ProviderError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    #[serde(alias = "product_id")]
    id: Option<String>,
    title: String,
    price: Option<f64>,
    link: Option<String>,
    #[serde(default)]
    snippet: String,
}

pub struct HttpSearchProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpSearchProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(Duration::from_secs(timeout_secs)).build()?;
        Ok(Self { client, base_url: base_url.into(), api_key })
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, ProviderError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let mut request = self
            .client
            .get(&url)
            .query(&[("q", query), ("num", &limit.to_string())]);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await?.error_for_status()?;
        let body: SearchResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .enumerate()
            .map(|(index, result)| SearchHit {
                id: result.id.unwrap_or_else(|| format!("result-{index}")),
                title: result.title,
                price: result.price,
                link: result.link,
                raw_text: result.snippet,
            })
            .collect())
    }
}
