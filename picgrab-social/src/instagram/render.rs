//! Rendering-engine capability used by the profile fetcher.
//!
//! An engine hands out isolated surfaces; a surface loads one page, exposes
//! its rendered document and is closed afterwards. Fetches never share a
//! surface, so any number of them may run at once.
use async_trait::async_trait;
use picgrab_common::Result;
use picgrab_drivers::picgrab_browser::driver::{DriverOptions, PicgrabDriver};
use picgrab_drivers::picgrab_browser::page::PicgrabPage;
use url::Url;

/// Something that can render pages with their scripts executed.
#[async_trait]
pub trait RenderingEngine: Send + Sync {
    /// Open a fresh browsing context for a single fetch.
    async fn open_surface(&self) -> Result<Box<dyn RenderSurface>>;
}

/// One isolated browsing context.
#[async_trait]
pub trait RenderSurface: Send {
    /// Navigate to `url` and return once the page reports completion.
    async fn load(&mut self, url: &Url) -> Result<()>;

    /// The rendered document as text, `None` if the page gave back something else.
    async fn document_source(&mut self) -> Result<Option<String>>;

    /// Where the surface ended up after redirects, if known.
    async fn current_url(&mut self) -> Option<Url>;

    /// Release the context.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Engine backed by a WebDriver service through fantoccini.
///
/// Every surface is its own WebDriver session.
#[derive(Debug, Clone, Default)]
pub struct FantocciniEngine {
    options: DriverOptions,
}

impl FantocciniEngine {
    pub fn new(options: DriverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DriverOptions {
        &self.options
    }
}

#[async_trait]
impl RenderingEngine for FantocciniEngine {
    async fn open_surface(&self) -> Result<Box<dyn RenderSurface>> {
        let driver = PicgrabDriver::new(&self.options).await?;
        Ok(Box::new(driver.page()))
    }
}

#[async_trait]
impl RenderSurface for PicgrabPage {
    async fn load(&mut self, url: &Url) -> Result<()> {
        self.goto(url.as_str()).await?;
        Ok(())
    }

    async fn document_source(&mut self) -> Result<Option<String>> {
        Ok(self.outer_html().await?)
    }

    async fn current_url(&mut self) -> Option<Url> {
        self.get_url().await.ok()
    }

    async fn close(self: Box<Self>) -> Result<()> {
        PicgrabPage::close(*self).await?;
        Ok(())
    }
}
