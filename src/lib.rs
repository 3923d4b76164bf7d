//! Render a single tweet as an embeddable HTML quote, Blackbird Pie style.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! let html = blackbird::embed_tweet_html("16342628623", None).await?;
//! println!("{}", html);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod entities;
pub mod fetch;
pub mod logging;
pub mod render;
pub mod selfcheck;
pub mod timestamp;
pub mod tweet;

use anyhow::{Context, Result};
use std::collections::HashMap;

use config::Config;
use entities::RewriteMode;
use fetch::{HttpStatusFetcher, StatusFetcher};
use render::{BlackbirdTemplate, EmbedFields, EmbedRenderer};
use timestamp::LocalZone;
use tweet::Tweet;

/// Fetch → decode → rewrite → localize → render, for one tweet at a time.
pub struct Embedder<F, R = BlackbirdTemplate> {
    fetcher: F,
    renderer: R,
    zone: LocalZone,
    rewrite_mode: RewriteMode,
}

impl<F: StatusFetcher> Embedder<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            renderer: BlackbirdTemplate,
            zone: LocalZone::default(),
            rewrite_mode: RewriteMode::default(),
        }
    }
}

impl Embedder<HttpStatusFetcher> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpStatusFetcher::new(config.api_base.clone(), &config.user_agent);
        Ok(Self::new(fetcher)
            .zone(config.local_zone()?)
            .rewrite_mode(config.rewrite_mode))
    }
}

impl<F: StatusFetcher, R: EmbedRenderer> Embedder<F, R> {
    pub fn zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn rewrite_mode(mut self, mode: RewriteMode) -> Self {
        self.rewrite_mode = mode;
        self
    }

    pub fn renderer<R2: EmbedRenderer>(self, renderer: R2) -> Embedder<F, R2> {
        Embedder {
            fetcher: self.fetcher,
            renderer,
            zone: self.zone,
            rewrite_mode: self.rewrite_mode,
        }
    }

    /// Fetch the tweet and render it. `extra_css` maps CSS class names to
    /// style text; only the outer `bbpBox` class is honoured.
    pub async fn embed(
        &self,
        tweet_id: &str,
        extra_css: Option<&HashMap<String, String>>,
    ) -> Result<String> {
        let body = self
            .fetcher
            .fetch(tweet_id)
            .await
            .with_context(|| format!("failed to fetch tweet {}", tweet_id))?;
        let tweet = tweet::decode(&body).with_context(|| format!("tweet {}", tweet_id))?;
        self.render_tweet(tweet_id, &tweet, extra_css)
    }

    /// Render an already decoded tweet. The permalink and container id use
    /// `tweet_id` as given, not the id inside the payload.
    pub fn render_tweet(
        &self,
        tweet_id: &str,
        tweet: &Tweet,
        extra_css: Option<&HashMap<String, String>>,
    ) -> Result<String> {
        let text_html = entities::rewrite(&tweet.text, &tweet.entities, self.rewrite_mode)
            .context("failed to rewrite tweet entities")?;
        let timestamp = timestamp::format_created_at(&tweet.created_at, self.zone)?;

        let fields = EmbedFields {
            id: tweet_id,
            screen_name: &tweet.user.screen_name,
            real_name: &tweet.user.name,
            text_html: &text_html,
            timestamp: &timestamp,
            box_style: render::box_style(extra_css),
        };

        Ok(self.renderer.render(&fields))
    }
}

/// Fetch a tweet from the public API with default settings and render it.
pub async fn embed_tweet_html(
    tweet_id: &str,
    extra_css: Option<&HashMap<String, String>>,
) -> Result<String> {
    Embedder::from_config(&Config::default())?
        .embed(tweet_id, extra_css)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetch::StaticFetcher;

    const BODY: &str = r#"{
        "text": "Tea with @Bob\n#brew",
        "created_at": "Wed Jun 09 18:31:55 +0000 2010",
        "source": "web",
        "user": {"screen_name": "alice", "name": "Alice"},
        "entities": {
            "urls": [],
            "user_mentions": [{"screen_name": "bob", "indices": [9, 13]}],
            "hashtags": [{"text": "brew", "indices": [14, 19]}]
        }
    }"#;

    fn embedder() -> Embedder<StaticFetcher> {
        Embedder::new(StaticFetcher::new().with_status("7", BODY))
            .zone(LocalZone::from_name("UTC").unwrap())
    }

    #[tokio::test]
    async fn test_embed_pipeline() {
        let html = embedder().embed("7", None).await.unwrap();
        assert!(html.starts_with(r#"<div class="bbpBox" id="t7"><blockquote>"#));
        assert!(html.contains(
            r#"Tea with <a href="http://twitter.com/bob">@Bob</a><br /><a href="http://twitter.com/search/%23brew">#brew</a>"#
        ));
        assert!(html.contains(r#"<span class="twTimeStamp">Wed Jun 9 2010</span>"#));
        assert!(html.contains(r#"<a href="https://twitter.com/#!/alice/status/7">"#));
    }

    #[tokio::test]
    async fn test_embed_extra_css() {
        let mut css = HashMap::new();
        css.insert("bbpBox".to_string(), "max-width: 30em".to_string());
        let html = embedder().embed("7", Some(&css)).await.unwrap();
        assert!(html.starts_with(r#"<div class="bbpBox" id="t7" style="max-width: 30em">"#));
    }

    #[tokio::test]
    async fn test_embed_missing_field_fails() {
        let fetcher = StaticFetcher::new().with_status("8", r#"{"text": "x"}"#);
        let err = Embedder::new(fetcher).embed("8", None).await.unwrap_err();
        assert!(format!("{:#}", err).contains("missing field"));
    }

    #[tokio::test]
    async fn test_embed_fetch_failure() {
        let err = embedder().embed("404", None).await.unwrap_err();
        assert!(err.to_string().contains("failed to fetch tweet 404"));
    }

    struct Plain;

    impl EmbedRenderer for Plain {
        fn render(&self, fields: &EmbedFields<'_>) -> String {
            format!("{}: {}", fields.screen_name, fields.timestamp)
        }
    }

    #[tokio::test]
    async fn test_custom_renderer() {
        let html = embedder().renderer(Plain).embed("7", None).await.unwrap();
        assert_eq!(html, "alice: Wed Jun 9 2010");
    }
}
