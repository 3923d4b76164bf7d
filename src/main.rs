use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser};
use std::collections::HashMap;
use std::path::PathBuf;

use blackbird::config::Config;
use blackbird::entities::RewriteMode;
use blackbird::timestamp::LocalZone;
use blackbird::{logging, selfcheck, Embedder};

/// Generate embeddable HTML for a tweet.
///
/// TWEET_ID is the trailing number of a status URL, e.g. 12346789 for
/// https://twitter.com/#!/spetznatz/status/12346789
#[derive(Parser, Debug)]
#[command(name = "blackbird", version, about, long_about)]
struct Cli {
    /// Numeric id of the tweet to render
    tweet_id: Option<String>,

    /// Run the built-in offline self-check and exit
    #[arg(long)]
    unittest: bool,

    /// Path to a config file (default: <config dir>/blackbird/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the status API
    #[arg(long)]
    api_base: Option<String>,

    /// IANA timezone for the date (default: the host's current UTC offset)
    #[arg(long)]
    timezone: Option<String>,

    /// Extra style for a CSS class, as CLASS=STYLE (repeatable)
    #[arg(long = "css", value_name = "CLASS=STYLE", value_parser = parse_css)]
    css: Vec<(String, String)>,

    /// Rewrite entities by whole-text substitution instead of their indices
    #[arg(long)]
    legacy_substitution: bool,
}

fn parse_css(s: &str) -> Result<(String, String)> {
    let (class, style) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("expected CLASS=STYLE, got {:?}", s))?;
    Ok((class.trim().to_string(), style.trim().to_string()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    if cli.unittest {
        if let Err(e) = selfcheck::run().await {
            eprintln!("FAILED: {:#}", e);
            std::process::exit(1);
        }
        println!("OK");
        return Ok(());
    }

    let Some(tweet_id) = cli.tweet_id.as_deref() else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    if let Some(timezone) = cli.timezone {
        // Validate before it reaches the embedder.
        LocalZone::from_name(&timezone)?;
        config.timezone = Some(timezone);
    }
    if cli.legacy_substitution {
        config.rewrite_mode = RewriteMode::Substitution;
    }
    let mut css: HashMap<String, String> = config.css.clone();
    css.extend(cli.css);

    let html = Embedder::from_config(&config)?
        .embed(tweet_id, Some(&css))
        .await?;
    println!("{}", html);

    Ok(())
}
