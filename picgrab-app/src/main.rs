use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use picgrab_common::observability::init_logging;
use picgrab_config::{PicgrabConfig, PicgrabConfigLoader};
use picgrab_drivers::picgrab_browser::driver::DriverOptions;
use picgrab_social::instagram::{FantocciniEngine, ProfileFetcher};

use cli::Cli;
use report::Reporter;

mod cli;
mod report;

const DEFAULT_CONFIG_FILE: &str = "picgrab.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Env wins over the file, flags win over both.
    let mut cfg: PicgrabConfig = match &cli.config {
        Some(path) => PicgrabConfigLoader::new().with_file(path),
        None => PicgrabConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    }
    .load()
    .context("failed to load configuration")?;
    cli.apply(&mut cfg);

    let mut log_config = cfg.logging.to_log_config("picgrab");
    log_config.emit_stderr = true;
    let log_path = init_logging(log_config)?;
    tracing::debug!(log = %log_path.display(), "logging initialised");

    let engine = FantocciniEngine::new(DriverOptions {
        webdriver_url: cfg.browser.webdriver_url.clone(),
        headless: cfg.browser.headless,
        stealth: cfg.browser.stealth,
    });
    let mut fetcher = ProfileFetcher::new(engine).with_host(cfg.profile.host.clone());
    if let Some(secs) = cfg.profile.timeout_secs {
        fetcher = fetcher.with_timeout(Duration::from_secs(secs));
    }

    if let Some(dir) = &cli.html_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let results =
        futures::future::join_all(cli.usernames.iter().map(|username| fetcher.fetch(username)))
            .await;

    let reporter = Reporter::new(std::io::stdout(), cli.json, cli.html_dir.clone());
    let mut failures = 0;
    for (username, result) in cli.usernames.iter().zip(&results) {
        reporter.report(username, result);
        if !result.is_success() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} fetches failed", results.len());
    }
    Ok(())
}
