//! Downloads every illustration of a pixiv artist.
//!
//! Requires geckodriver to be running (port 4444 by default).
//!
//! # Usage
//!
//! ```bash
//! geckodriver &
//! cargo run --bin curate -- --url https://www.pixiv.net/en/users/11
//! cargo run --bin curate -- --url https://www.pixiv.net/en/users/11 --directory ./mika/ --headless
//! ```

use std::{error::Error, path::PathBuf, time::Duration};

use clap::Parser;
use pixiv_curator::{
    CurateConfig, WebDriverPage,
    config::{DEFAULT_DIRECTORY, DEFAULT_SETTLE, DEFAULT_WEBDRIVER_URL},
    curate,
};
use tracing_subscriber::{EnvFilter, filter::ParseError};

const DEFAULT_LOG_FILTER: &str = "pixiv_curator=info";
const VERBOSE_LOG_DIRECTIVE: &str = "pixiv_curator=debug";

#[derive(Parser)]
#[command(name = "curate", about = "pixiv artwork dataset curator", version)]
struct Cli {
    /// URL to the artist on pixiv
    #[arg(long)]
    url: String,

    /// Destination directory
    #[arg(long, default_value = DEFAULT_DIRECTORY)]
    directory: PathBuf,

    /// WebDriver server to connect to
    #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver: String,

    /// Milliseconds to wait after each navigation
    #[arg(long, default_value_t = DEFAULT_SETTLE.as_millis() as u64)]
    settle_ms: u64,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let env_filter = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env_filter.as_deref(), cli.verbose)?)
        .with_target(false)
        .init();

    let config = CurateConfig::new(&cli.url).with_directory(cli.directory);
    let mut page =
        WebDriverPage::connect(&cli.webdriver, cli.headless, Duration::from_millis(cli.settle_ms))
            .await?;

    let result = curate(&mut page, &config).await;
    page.quit().await?;
    let summary = result?;

    println!("\nComplete! {summary}");
    println!("Images saved to {}", config.directory.display());

    Ok(())
}

/// Builds the log filter from `RUST_LOG`, falling back to info for this crate.
///
/// `--verbose` overrides the crate's level with debug; other env directives stay.
fn log_filter(env: Option<&str>, verbose: bool) -> Result<EnvFilter, ParseError> {
    let filter = match env.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    };
    if verbose {
        return Ok(filter.add_directive(VERBOSE_LOG_DIRECTIVE.parse()?));
    }
    Ok(filter)
}
