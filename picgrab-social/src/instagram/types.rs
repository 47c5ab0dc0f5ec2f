use url::Url;

/// Why a profile fetch produced no document.
///
/// The messages are part of the contract: callers surface them verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The username could not be combined with the host into a valid URL.
    #[error("Cannot create a url from: {url}")]
    UrlConstruction { url: String },

    /// Navigation failed, timed out, or the page gave back no text.
    #[error("Cannot load HTML from: {url}")]
    DocumentRetrieval { url: String },
}

/// Terminal outcome of one profile fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The page rendered. `image_url` is `None` when no picture link was found.
    Success {
        image_url: Option<Url>,
        raw_markup: String,
    },
    Failure(FetchError),
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn image_url(&self) -> Option<&Url> {
        match self {
            Self::Success { image_url, .. } => image_url.as_ref(),
            Self::Failure(_) => None,
        }
    }

    pub fn raw_markup(&self) -> Option<&str> {
        match self {
            Self::Success { raw_markup, .. } => Some(raw_markup),
            Self::Failure(_) => None,
        }
    }

    /// Deliver this outcome to `listener`; exactly one method is called.
    pub fn notify(&self, listener: &dyn FetchListener) {
        match self {
            Self::Success {
                image_url,
                raw_markup,
            } => listener.loading_finished(image_url.as_ref(), raw_markup),
            Self::Failure(error) => listener.loading_failed(error),
        }
    }

    pub fn into_result(self) -> Result<(Option<Url>, String), FetchError> {
        match self {
            Self::Success {
                image_url,
                raw_markup,
            } => Ok((image_url, raw_markup)),
            Self::Failure(error) => Err(error),
        }
    }
}

impl From<FetchError> for FetchResult {
    fn from(error: FetchError) -> Self {
        Self::Failure(error)
    }
}

/// Callback-style consumer of fetch outcomes.
pub trait FetchListener: Send + Sync {
    /// The profile page could not be fetched.
    fn loading_failed(&self, error: &FetchError);

    /// The profile page was fetched; `raw_markup` is the whole rendered document.
    fn loading_finished(&self, image_url: Option<&Url>, raw_markup: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl FetchListener for Recorder {
        fn loading_failed(&self, error: &FetchError) {
            self.calls.lock().unwrap().push(format!("failed:{error}"));
        }

        fn loading_finished(&self, image_url: Option<&Url>, raw_markup: &str) {
            self.calls.lock().unwrap().push(format!(
                "finished:{}:{}",
                image_url.map(Url::as_str).unwrap_or("-"),
                raw_markup.len()
            ));
        }
    }

    #[test]
    fn error_messages_are_verbatim() {
        let err = FetchError::UrlConstruction {
            url: "https://instagram.com/a b".into(),
        };
        assert_eq!(err.to_string(), "Cannot create a url from: https://instagram.com/a b");
        let err = FetchError::DocumentRetrieval {
            url: "https://instagram.com/someone".into(),
        };
        assert_eq!(err.to_string(), "Cannot load HTML from: https://instagram.com/someone");
    }

    #[test]
    fn failure_notifies_only_the_failure_path() {
        let recorder = Recorder::default();
        FetchResult::from(FetchError::DocumentRetrieval { url: "u".into() }).notify(&recorder);
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec!["failed:Cannot load HTML from: u".to_string()]
        );
    }

    #[test]
    fn success_notifies_once_with_markup() {
        let recorder = Recorder::default();
        let result = FetchResult::Success {
            image_url: None,
            raw_markup: "<html/>".into(),
        };
        result.notify(&recorder);
        assert_eq!(*recorder.calls.lock().unwrap(), vec!["finished:-:7".to_string()]);
        assert_eq!(result.raw_markup(), Some("<html/>"));
        assert!(result.into_result().is_ok());
    }
}
