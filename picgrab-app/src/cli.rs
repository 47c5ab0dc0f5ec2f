use std::path::PathBuf;

use clap::Parser;
use picgrab_config::PicgrabConfig;

/// Look up profile pictures from public profile pages.
#[derive(Debug, Parser)]
#[command(name = "picgrab", version)]
pub struct Cli {
    /// Usernames to look up; all are fetched concurrently.
    #[arg(required = true)]
    pub usernames: Vec<String>,

    /// Config file; `picgrab.yaml` in the working directory is used if present.
    #[arg(short, long, env = "PICGRAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host serving the profile pages.
    #[arg(long)]
    pub host: Option<String>,

    /// WebDriver endpoint, e.g. a running chromedriver.
    #[arg(long, env = "PICGRAB_WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Show the browser window instead of running headless.
    #[arg(long)]
    pub headed: bool,

    /// Give up on a page after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Write each fetched document to `<dir>/<username>.html`.
    #[arg(long)]
    pub html_dir: Option<PathBuf>,

    /// Print one JSON object per username instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Command-line flags win over file and environment settings.
    pub fn apply(&self, cfg: &mut PicgrabConfig) {
        if let Some(host) = &self.host {
            cfg.profile.host = host.clone();
        }
        if let Some(url) = &self.webdriver_url {
            cfg.browser.webdriver_url = url.clone();
        }
        if self.headed {
            cfg.browser.headless = false;
        }
        if let Some(secs) = self.timeout_secs {
            cfg.profile.timeout_secs = Some(secs);
        }
    }
}
