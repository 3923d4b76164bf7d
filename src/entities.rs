//! Turns the entity annotations of a tweet into HTML links and inline photos.
//!
//! Two strategies are available:
//! - span splicing, which uses the API's `indices` and replaces each span
//!   exactly once in position order;
//! - substitution, four whole-text passes (URLs, mentions, hashtags, media)
//!   that replace every occurrence of each annotated substring.
//!
//! [`RewriteMode::Auto`] splices when every annotation carries consistent
//! indices and falls back to substitution otherwise.

use anyhow::Result;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::tweet::{Entities, HashtagEntity, MediaEntity, MediaKind, MentionEntity, UrlEntity};

pub const PROFILE_URL_BASE: &str = "http://twitter.com/";
pub const SEARCH_URL_BASE: &str = "http://twitter.com/search/%23";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMode {
    #[default]
    Auto,
    Substitution,
}

/// Rewrite the tweet text into HTML and convert newlines to `<br />`.
pub fn rewrite(text: &str, entities: &Entities, mode: RewriteMode) -> Result<String> {
    let html = match mode {
        RewriteMode::Auto => match splice_spans(text, entities) {
            Some(html) => html,
            None => {
                tracing::warn!("entity indices unusable, falling back to substitution");
                substitute(text, entities)?
            }
        },
        RewriteMode::Substitution => substitute(text, entities)?,
    };

    Ok(html.replace('\n', "<br />"))
}

/// Whole-text substitution in the fixed order URLs, mentions, hashtags, media.
///
/// Every occurrence of an annotated substring is replaced, and later passes
/// see the markup inserted by earlier ones.
pub fn substitute(text: &str, entities: &Entities) -> Result<String> {
    let mut text = text.to_string();

    for u in &entities.urls {
        text = text.replace(&u.url, &url_link(u));
    }

    for m in &entities.user_mentions {
        let pattern = Regex::new(&format!("(?i)@{}", regex::escape(&m.screen_name)))?;
        text = pattern
            .replace_all(&text, |caps: &Captures| mention_link(m, &caps[0][1..]))
            .into_owned();
    }

    for h in &entities.hashtags {
        let pattern = Regex::new(&format!("(?i)#{}", regex::escape(&h.text)))?;
        text = pattern
            .replace_all(&text, |caps: &Captures| hashtag_link(h, &caps[0][1..]))
            .into_owned();
    }

    for m in &entities.media {
        text = text.replace(&m.url, &media_link(m));
    }

    Ok(text)
}

/// A located annotation: `[start, end)` byte range plus its markup.
#[derive(Debug)]
struct Span {
    start: usize,
    end: usize,
    html: String,
}

/// Single-pass replacement driven by entity `indices`.
///
/// Returns `None` if any annotation lacks indices, points outside the text,
/// overlaps another annotation, or does not cover the text it names.
pub fn splice_spans(text: &str, entities: &Entities) -> Option<String> {
    // Byte offset of every char boundary, including the end of the text.
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    let locate = |indices: Option<[usize; 2]>| -> Option<(usize, usize)> {
        let [start, end] = indices?;
        if start >= end {
            return None;
        }
        Some((*offsets.get(start)?, *offsets.get(end)?))
    };

    let mut spans = Vec::new();

    for u in &entities.urls {
        let (start, end) = locate(u.indices)?;
        if text[start..end] != u.url {
            return None;
        }
        spans.push(Span {
            start,
            end,
            html: url_link(u),
        });
    }

    for m in &entities.user_mentions {
        let (start, end) = locate(m.indices)?;
        let handle = strip_sigil(&text[start..end], '@', &m.screen_name)?;
        spans.push(Span {
            start,
            end,
            html: mention_link(m, handle),
        });
    }

    for h in &entities.hashtags {
        let (start, end) = locate(h.indices)?;
        let tag = strip_sigil(&text[start..end], '#', &h.text)?;
        spans.push(Span {
            start,
            end,
            html: hashtag_link(h, tag),
        });
    }

    for m in &entities.media {
        let (start, end) = locate(m.indices)?;
        if text[start..end] != m.url {
            return None;
        }
        spans.push(Span {
            start,
            end,
            html: media_link(m),
        });
    }

    spans.sort_by_key(|s| s.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in &spans {
        if span.start < cursor {
            return None;
        }
        out.push_str(&text[cursor..span.start]);
        out.push_str(&span.html);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);

    Some(out)
}

/// `@Name` / `#Tag` matched case-insensitively against the annotation; returns
/// the name as written in the text.
fn strip_sigil<'a>(slice: &'a str, sigil: char, expected: &str) -> Option<&'a str> {
    let rest = slice.strip_prefix(sigil)?;
    if rest.to_lowercase() == expected.to_lowercase() {
        Some(rest)
    } else {
        None
    }
}

fn url_link(u: &UrlEntity) -> String {
    let (href, display) = u.link_parts();
    anchor(href, display)
}

fn mention_link(m: &MentionEntity, shown: &str) -> String {
    format!(
        r#"<a href="{}{}">@{}</a>"#,
        PROFILE_URL_BASE, m.screen_name, shown
    )
}

fn hashtag_link(h: &HashtagEntity, shown: &str) -> String {
    format!(r#"<a href="{}{}">#{}</a>"#, SEARCH_URL_BASE, h.text, shown)
}

fn media_link(m: &MediaEntity) -> String {
    match m.kind {
        MediaKind::Photo => format!(
            r#"<br /><br /><a href="{0}:large"><img src="{0}:small"></a><br />"#,
            m.media_url
        ),
        MediaKind::Other => {
            let (href, display) = m.link_parts();
            anchor(href, display)
        }
    }
}

fn anchor(href: &str, text: &str) -> String {
    format!(r#"<a href="{}">{}</a>"#, href, text)
}
