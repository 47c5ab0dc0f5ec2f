use std::future::Future;
use std::time::Duration;

use picgrab_common::PicgrabError;
use tokio::time::Instant;
use url::Url;

use crate::instagram::extract::extract_profile_image;
use crate::instagram::render::{RenderSurface, RenderingEngine};
use crate::instagram::types::{FetchError, FetchResult};

/// Host serving public profile pages.
pub const DEFAULT_HOST: &str = "instagram.com";

/// Extra time a timed fetch allows for releasing its surface.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Fetches a profile page and pulls the profile picture link out of it.
///
/// Holds no per-fetch state: each call to [`ProfileFetcher::fetch`] opens its
/// own rendering surface, so one fetcher may serve concurrent fetches.
#[derive(Debug, Clone)]
pub struct ProfileFetcher<E> {
    engine: E,
    host: String,
    timeout: Option<Duration>,
}

impl<E: RenderingEngine> ProfileFetcher<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            host: DEFAULT_HOST.to_string(),
            timeout: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Bound surface creation, page load and document read by one deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Build `https://<host>/<username>`.
    ///
    /// Rejected when the username is empty or the parser would have to
    /// rewrite it (escaping, dot segments, extra path/query/fragment). The
    /// host may be normalised freely.
    pub fn profile_url(&self, username: &str) -> Result<Url, FetchError> {
        let raw = format!("https://{}/{}", self.host, username);
        let invalid = || FetchError::UrlConstruction { url: raw.clone() };

        if username.is_empty() {
            return Err(invalid());
        }
        let url = Url::parse(&raw).map_err(|_| invalid())?;
        let single_segment = url.path_segments().map(Iterator::count) == Some(1)
            && url.query().is_none()
            && url.fragment().is_none();
        if url.path() != format!("/{username}") || !single_segment {
            return Err(invalid());
        }
        Ok(url)
    }

    /// Fetch the profile page for `username`; exactly one outcome is returned.
    #[tracing::instrument(skip(self), fields(host = %self.host))]
    pub async fn fetch(&self, username: &str) -> FetchResult {
        let url = match self.profile_url(username) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!(error = %err, "refusing to fetch");
                return err.into();
            }
        };

        match self.render(&url).await {
            Ok(document) => FetchResult::Success {
                image_url: extract_profile_image(&document),
                raw_markup: document,
            },
            Err(err) => err.into(),
        }
    }

    async fn render(&self, url: &Url) -> Result<String, FetchError> {
        let deadline = self.timeout.map(|limit| Instant::now() + limit);
        let retrieval_error = |reported: &Url| FetchError::DocumentRetrieval {
            url: reported.to_string(),
        };

        let mut surface = within(deadline, self.engine.open_surface())
            .await
            .map_err(|err| {
                tracing::warn!(%url, error = %err, "could not open a rendering surface");
                retrieval_error(url)
            })?;

        let outcome = within(deadline, load_document(surface.as_mut(), url)).await;

        let document = match outcome {
            Ok(Some(document)) => Ok(document),
            Ok(None) => {
                let reported = surface.current_url().await.unwrap_or_else(|| url.clone());
                tracing::warn!(url = %reported, "page returned no markup");
                Err(retrieval_error(&reported))
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "page load failed");
                Err(retrieval_error(url))
            }
        };

        let closing = surface.close();
        let closed = match self.timeout {
            Some(_) => tokio::time::timeout(CLOSE_GRACE, closing)
                .await
                .unwrap_or(Err(PicgrabError::Timeout)),
            None => closing.await,
        };
        if let Err(err) = closed {
            tracing::debug!(%url, error = %err, "closing rendering surface failed");
        }
        document
    }
}

async fn load_document(
    surface: &mut dyn RenderSurface,
    url: &Url,
) -> picgrab_common::Result<Option<String>> {
    surface.load(url).await?;
    if let Some(landed) = surface.current_url().await {
        tracing::info!(url = %landed, "page load finished");
    }
    surface.document_source().await
}

async fn within<T>(
    deadline: Option<Instant>,
    work: impl Future<Output = picgrab_common::Result<T>>,
) -> picgrab_common::Result<T> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, work)
            .await
            .unwrap_or(Err(PicgrabError::Timeout)),
        None => work.await,
    }
}
