use super::StatusFetcher;
use anyhow::{Context, Result};
use async_trait::async_trait;

pub const DEFAULT_API_BASE: &str = "http://api.twitter.com";

/// Fetches `1/statuses/show.json` over HTTP. Unauthenticated, no retries.
pub struct HttpStatusFetcher {
    api_base: String,
    client: reqwest::Client,
}

impl HttpStatusFetcher {
    pub fn new(api_base: impl Into<String>, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_base: api_base.into(),
            client,
        }
    }

    pub fn status_url(&self, tweet_id: &str) -> String {
        format!(
            "{}/1/statuses/show.json?include_entities=true&id={}",
            self.api_base.trim_end_matches('/'),
            urlencoding::encode(tweet_id),
        )
    }
}

#[async_trait]
impl StatusFetcher for HttpStatusFetcher {
    async fn fetch(&self, tweet_id: &str) -> Result<Vec<u8>> {
        let url = self.status_url(tweet_id);
        tracing::debug!(%url, "fetching status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "status API error: {} for {}",
                response.status(),
                url
            ));
        }

        // Reading the whole body hands the connection back before we return.
        let body = response
            .bytes()
            .await
            .with_context(|| format!("failed to read body from {}", url))?;
        tracing::debug!(bytes = body.len(), "status fetched");

        Ok(body.to_vec())
    }
}
