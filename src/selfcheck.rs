//! Offline check of the full pipeline against a bundled status and its
//! expected fragment. Backs the CLI's `--unittest` flag.

use anyhow::{bail, Result};

use crate::fetch::StaticFetcher;
use crate::timestamp::LocalZone;
use crate::Embedder;

pub const FIXTURE_ID: &str = "16342628623";
pub const FIXTURE_STATUS: &str = include_str!("../tests/fixtures/status_16342628623.json");
pub const FIXTURE_EMBED: &str = include_str!("../tests/fixtures/embed_16342628623.html");

/// Render the bundled status and compare it with the expected fragment.
pub async fn run() -> Result<()> {
    let embedder = Embedder::new(StaticFetcher::new().with_status(FIXTURE_ID, FIXTURE_STATUS))
        .zone(LocalZone::from_name("UTC")?);
    let rendered = embedder.embed(FIXTURE_ID, None).await?;

    if rendered != FIXTURE_EMBED {
        bail!(
            "rendered fragment differs from fixture\nexpected: {}\n     got: {}",
            FIXTURE_EMBED.trim_end(),
            rendered.trim_end()
        );
    }

    tracing::info!(id = FIXTURE_ID, "self-check passed");
    Ok(())
}
