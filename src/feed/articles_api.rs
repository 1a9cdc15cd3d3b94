use super::types::{ArticlesResponse, RawArticle};
use super::ArticleFeed;
use crate::config::MAX_FETCH_LIMIT;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

/// HTTP client for the articles API. One GET per fetch, no retries and no
/// caching; a failed request is reported once and rendered as an error state.
pub struct ArticlesApi {
    client: Client,
    base_url: String,
}

impl ArticlesApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ArticleFeed for ArticlesApi {
    async fn fetch_articles(&self, limit: u32) -> Result<Vec<RawArticle>> {
        // The server caps limit at 500; clamp up front so the request says
        // what it gets.
        let limit = limit.min(MAX_FETCH_LIMIT);
        let url = format!("{}?limit={}", self.base_url, limit);
        let started = std::time::Instant::now();

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("articles API request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("articles API returned {}: {}", status, body);
        }

        let envelope: ArticlesResponse = resp
            .json()
            .await
            .context("failed to parse articles API response")?;

        info!(
            count = envelope.articles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched articles"
        );

        Ok(envelope.articles)
    }
}
