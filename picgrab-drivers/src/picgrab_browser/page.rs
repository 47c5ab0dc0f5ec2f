use crate::picgrab_browser::{
    behavioral::BehavioralEngine, fingerprint::UserAgentManager, stealth::StealthScripts,
};
use anyhow::Result;
use fantoccini::Client;
use picgrab_common::StealthLevel;
use serde_json::Value;
use url::Url;

/// Script returning the rendered document as markup.
pub const OUTER_HTML_SCRIPT: &str = "return document.documentElement.outerHTML.toString();";

/// One browsing context on a WebDriver session.
pub struct PicgrabPage {
    pub(crate) client: Client,
    pub(crate) stealth: StealthLevel,
    pub(crate) fingerprint_manager: UserAgentManager,
    pub(crate) behavioral_engine: BehavioralEngine,
}

impl PicgrabPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(
        client: Client,
        stealth: StealthLevel,
        fingerprint_manager: UserAgentManager,
        behavioral_engine: BehavioralEngine,
    ) -> Self {
        Self {
            client,
            stealth,
            fingerprint_manager,
            behavioral_engine,
        }
    }

    /// Navigate to `url` and apply stealth/fingerprint scripts.
    ///
    /// WebDriver returns once the document reports `readyState == "complete"`.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.behavioral_engine.random_delay(300, 1200).await;
        self.client.goto(url).await.map_err(anyhow::Error::from)?;

        self.apply_stealth_and_fingerprint().await?;

        Ok(())
    }

    async fn apply_stealth_and_fingerprint(&mut self) -> Result<()> {
        let profile = self.fingerprint_manager.get_session_profile(self.stealth);
        for script in StealthScripts::for_level(self.stealth, profile) {
            self.client.execute(&script, vec![]).await?;
        }
        Ok(())
    }

    /// Evaluate `document.documentElement.outerHTML` in the page.
    ///
    /// `None` when the script produced something other than a string.
    pub async fn outer_html(&self) -> Result<Option<String>> {
        let value = self.client.execute(OUTER_HTML_SCRIPT, vec![]).await?;
        Ok(markup_from_script_value(value))
    }

    /// Return the current page URL.
    pub async fn get_url(&self) -> Result<Url> {
        self.client.current_url().await.map_err(anyhow::Error::msg)
    }

    /// Close the session this page belongs to.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

fn markup_from_script_value(value: Value) -> Option<String> {
    match value {
        Value::String(markup) => Some(markup),
        _ => None,
    }
}
