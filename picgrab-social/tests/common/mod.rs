use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use picgrab_common::{PicgrabError, Result};
use picgrab_social::instagram::{RenderSurface, RenderingEngine};
use url::Url;

/// What a canned surface does when asked to load a page.
#[derive(Debug, Clone)]
pub enum Canned {
    /// Load succeeds and the page serialises to this markup.
    Document(String),
    /// Load succeeds but the document script yields a non-string.
    NotText,
    /// Navigation fails.
    NavigationFails,
    /// Load takes this long before yielding the markup.
    Slow(Duration, String),
}

/// Shared counters so tests can inspect what the fetcher did.
#[derive(Debug, Default)]
pub struct Ledger {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub loaded: Mutex<Vec<Url>>,
}

impl Ledger {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn loaded(&self) -> Vec<Url> {
        self.loaded.lock().unwrap().clone()
    }
}

/// Engine handing out surfaces that replay one canned behaviour.
#[derive(Debug, Clone)]
pub struct CannedEngine {
    pub canned: Canned,
    pub redirect_to: Option<Url>,
    pub ledger: Arc<Ledger>,
}

impl CannedEngine {
    pub fn new(canned: Canned) -> Self {
        Self {
            canned,
            redirect_to: None,
            ledger: Arc::new(Ledger::default()),
        }
    }

    pub fn document(markup: &str) -> Self {
        Self::new(Canned::Document(markup.to_string()))
    }

    pub fn redirecting_to(mut self, url: &str) -> Self {
        self.redirect_to = Some(Url::parse(url).unwrap());
        self
    }
}

#[async_trait]
impl RenderingEngine for CannedEngine {
    async fn open_surface(&self) -> Result<Box<dyn RenderSurface>> {
        self.ledger.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CannedSurface {
            canned: self.canned.clone(),
            redirect_to: self.redirect_to.clone(),
            current: None,
            ledger: Arc::clone(&self.ledger),
        }))
    }
}

struct CannedSurface {
    canned: Canned,
    redirect_to: Option<Url>,
    current: Option<Url>,
    ledger: Arc<Ledger>,
}

#[async_trait]
impl RenderSurface for CannedSurface {
    async fn load(&mut self, url: &Url) -> Result<()> {
        self.ledger.loaded.lock().unwrap().push(url.clone());
        match &self.canned {
            Canned::NavigationFails => {
                return Err(PicgrabError::Driver(anyhow::anyhow!("net::ERR_NAME_NOT_RESOLVED")));
            }
            Canned::Slow(delay, _) => tokio::time::sleep(*delay).await,
            Canned::Document(_) | Canned::NotText => {}
        }
        self.current = Some(self.redirect_to.clone().unwrap_or_else(|| url.clone()));
        Ok(())
    }

    async fn document_source(&mut self) -> Result<Option<String>> {
        Ok(match &self.canned {
            Canned::Document(markup) | Canned::Slow(_, markup) => Some(markup.clone()),
            Canned::NotText | Canned::NavigationFails => None,
        })
    }

    async fn current_url(&mut self) -> Option<Url> {
        self.current.clone()
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.ledger.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub const PROFILE_PAGE: &str = concat!(
    r#"<html><head><link rel="canonical" href="https://www.instagram.com/someone/"></head>"#,
    r#"<body><img alt="someone's profile picture" "#,
    r#"src="https://scontent-ams2-1.cdninstagram.com/v/t51.2885-19/s150x150/1234_n.jpg?_nc_ht=scontent&amp;oh=00_ab&amp;oe=6530">"#,
    r#"</body></html>"#
);

pub const PROFILE_PICTURE: &str = "https://scontent-ams2-1.cdninstagram.com/v/t51.2885-19/s150x150/1234_n.jpg?_nc_ht=scontent&oh=00_ab&oe=6530";
