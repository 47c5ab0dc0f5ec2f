use crate::picgrab_browser::{
    behavioral::BehavioralEngine,
    fingerprint::{UserAgentManager, UserAgentProfile},
    page::PicgrabPage,
    stealth::build_stealth_arguments,
};
use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use picgrab_common::StealthLevel;
use serde_json::json;
use webdriver::capabilities::Capabilities;

/// Default Chromedriver endpoint.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// How to reach the WebDriver service and what kind of browser to ask for.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub webdriver_url: String,
    pub headless: bool,
    pub stealth: StealthLevel,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            stealth: StealthLevel::default(),
        }
    }
}

/// Chrome capabilities for one session.
pub fn build_capabilities(options: &DriverOptions, profile: &UserAgentProfile) -> Capabilities {
    let args = build_stealth_arguments(options.stealth, profile, options.headless);
    let mut caps = Capabilities::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": args }),
    );
    caps
}

/// Thin wrapper around a `fantoccini` WebDriver client with stealth and
/// behavioral helpers. Each driver owns exactly one browser session.
pub struct PicgrabDriver {
    pub client: Client,
    pub behavioral_engine: BehavioralEngine,
    pub user_agent_manager: UserAgentManager,
    pub stealth: StealthLevel,
}

impl PicgrabDriver {
    /// Open a new session on the WebDriver service named in `options`.
    pub async fn new(options: &DriverOptions) -> Result<Self> {
        let mut user_agent_manager = UserAgentManager::new();
        let profile = user_agent_manager.get_session_profile(options.stealth);
        let caps = build_capabilities(options, profile);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&options.webdriver_url)
            .await
            .with_context(|| format!("failed to open a session on {}", options.webdriver_url))?;

        tracing::debug!(
            target: "browser.driver",
            webdriver = %options.webdriver_url,
            headless = options.headless,
            stealth = ?options.stealth,
            "webdriver session opened"
        );

        Ok(Self {
            client,
            behavioral_engine: BehavioralEngine::new(),
            user_agent_manager,
            stealth: options.stealth,
        })
    }

    /// A page bound to this driver's session; nothing is loaded yet.
    pub fn page(&self) -> PicgrabPage {
        PicgrabPage::new(
            self.client.clone(),
            self.stealth,
            self.user_agent_manager.clone(),
            self.behavioral_engine.clone(),
        )
    }
}
