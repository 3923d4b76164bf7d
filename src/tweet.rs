use anyhow::{Context, Result};
use serde::Deserialize;

/// A single status as returned by `1/statuses/show.json?include_entities=true`.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    #[serde(default)]
    pub id_str: Option<String>,
    pub text: String,
    pub created_at: String,
    pub source: String,
    pub user: User,
    pub entities: Entities,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub screen_name: String,
    pub name: String,
    // Profile styling is carried through for custom templates; the stock
    // template does not render it.
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub profile_background_color: Option<String>,
    #[serde(default)]
    pub profile_background_image_url: Option<String>,
    #[serde(default)]
    pub profile_text_color: Option<String>,
    #[serde(default)]
    pub profile_link_color: Option<String>,
    #[serde(default)]
    pub utc_offset: Option<i64>,
}

/// Annotated spans of the tweet text.
///
/// `media` is missing from older API responses and is treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entities {
    pub urls: Vec<UrlEntity>,
    pub user_mentions: Vec<MentionEntity>,
    pub hashtags: Vec<HashtagEntity>,
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

/// `[start, end)` in Unicode scalar values of the tweet text.
pub type Indices = [usize; 2];

#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    /// The shortened URL exactly as it appears in the text
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(default)]
    pub indices: Option<Indices>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MentionEntity {
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub indices: Option<Indices>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashtagEntity {
    pub text: String,
    #[serde(default)]
    pub indices: Option<Indices>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntity {
    pub url: String,
    pub media_url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub indices: Option<Indices>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    #[serde(other)]
    Other,
}

impl UrlEntity {
    /// `(href, visible text)`: the expanded/display pair when both are
    /// present, otherwise the short URL for both.
    pub fn link_parts(&self) -> (&str, &str) {
        link_parts(
            &self.url,
            self.expanded_url.as_deref(),
            self.display_url.as_deref(),
        )
    }
}

impl MediaEntity {
    pub fn link_parts(&self) -> (&str, &str) {
        link_parts(
            &self.url,
            self.expanded_url.as_deref(),
            self.display_url.as_deref(),
        )
    }
}

fn link_parts<'a>(
    url: &'a str,
    expanded: Option<&'a str>,
    display: Option<&'a str>,
) -> (&'a str, &'a str) {
    match (expanded, display) {
        (Some(expanded), Some(display)) => (expanded, display),
        _ => (url, url),
    }
}

/// Decode a raw API response body.
pub fn decode(body: &[u8]) -> Result<Tweet> {
    let text = std::str::from_utf8(body).context("status response is not valid UTF-8")?;
    let tweet: Tweet = serde_json::from_str(text).context("failed to decode status JSON")?;
    Ok(tweet)
}
