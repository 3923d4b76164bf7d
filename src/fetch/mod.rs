pub mod twitter_api;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;

pub use twitter_api::HttpStatusFetcher;

/// Retrieves the raw JSON body for a single status.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    async fn fetch(&self, tweet_id: &str) -> Result<Vec<u8>>;
}

/// Serves canned response bodies keyed by tweet id. Used for offline runs and
/// tests in place of the network.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, tweet_id: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(tweet_id.into(), body.into());
        self
    }
}

#[async_trait]
impl StatusFetcher for StaticFetcher {
    async fn fetch(&self, tweet_id: &str) -> Result<Vec<u8>> {
        self.bodies
            .get(tweet_id)
            .cloned()
            .ok_or_else(|| anyhow!("no canned status for id {}", tweet_id))
    }
}
