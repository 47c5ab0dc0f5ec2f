use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use picgrab_social::instagram::{FetchError, FetchListener, FetchResult};
use serde::Serialize;
use url::Url;

/// One line of output per username.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReportLine {
    pub username: String,
    pub image_url: Option<String>,
    pub error: Option<String>,
    pub markup_bytes: Option<usize>,
}

impl ReportLine {
    fn text(&self) -> String {
        match (&self.error, &self.image_url) {
            (Some(error), _) => format!("{}: error: {error}", self.username),
            (None, Some(url)) => format!("{}: {url}", self.username),
            (None, None) => format!("{}: no profile picture found", self.username),
        }
    }
}

/// Writes fetch outcomes to `out`, optionally saving markup under `html_dir`.
pub struct Reporter<W> {
    out: Mutex<W>,
    json: bool,
    html_dir: Option<PathBuf>,
}

impl<W: Write + Send> Reporter<W> {
    pub fn new(out: W, json: bool, html_dir: Option<PathBuf>) -> Self {
        Self {
            out: Mutex::new(out),
            json,
            html_dir,
        }
    }

    pub fn report(&self, username: &str, result: &FetchResult) {
        result.notify(&UserReport {
            username,
            reporter: self,
        });
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn emit(&self, line: ReportLine) {
        let rendered = if self.json {
            match serde_json::to_string(&line) {
                Ok(json) => json,
                Err(err) => {
                    tracing::error!(error = %err, "could not serialise report line");
                    return;
                }
            }
        } else {
            line.text()
        };

        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(out, "{rendered}") {
            tracing::error!(error = %err, "could not write report line");
        }
    }

    fn save_markup(&self, username: &str, markup: &str) {
        let Some(dir) = &self.html_dir else {
            return;
        };
        let path = dir.join(format!("{username}.html"));
        match std::fs::write(&path, markup) {
            Ok(()) => tracing::info!(path = %path.display(), "saved profile markup"),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not save profile markup")
            }
        }
    }
}

struct UserReport<'a, W> {
    username: &'a str,
    reporter: &'a Reporter<W>,
}

impl<W: Write + Send> FetchListener for UserReport<'_, W> {
    fn loading_failed(&self, error: &FetchError) {
        self.reporter.emit(ReportLine {
            username: self.username.to_string(),
            image_url: None,
            error: Some(error.to_string()),
            markup_bytes: None,
        });
    }

    fn loading_finished(&self, image_url: Option<&Url>, raw_markup: &str) {
        self.reporter.save_markup(self.username, raw_markup);
        self.reporter.emit(ReportLine {
            username: self.username.to_string(),
            image_url: image_url.map(|url| url.to_string()),
            error: None,
            markup_bytes: Some(raw_markup.len()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(image: Option<&str>, markup: &str) -> FetchResult {
        FetchResult::Success {
            image_url: image.map(|s| Url::parse(s).unwrap()),
            raw_markup: markup.to_string(),
        }
    }

    #[test]
    fn text_lines_cover_every_outcome() {
        let reporter = Reporter::new(Vec::new(), false, None);
        reporter.report("alpha", &success(Some("https://cdn.example.com/s150x150/a.jpg"), "<html/>"));
        reporter.report("beta", &success(None, "<html/>"));
        reporter.report(
            "gamma delta",
            &FetchResult::Failure(FetchError::UrlConstruction {
                url: "https://instagram.com/gamma delta".into(),
            }),
        );

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            out,
            "alpha: https://cdn.example.com/s150x150/a.jpg\n\
             beta: no profile picture found\n\
             gamma delta: error: Cannot create a url from: https://instagram.com/gamma delta\n"
        );
    }

    #[test]
    fn json_lines_parse_back() {
        let reporter = Reporter::new(Vec::new(), true, None);
        reporter.report("alpha", &success(None, "<html></html>"));

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["username"], "alpha");
        assert!(value["image_url"].is_null());
        assert!(value["error"].is_null());
        assert_eq!(value["markup_bytes"], 13);
    }

    #[test]
    fn markup_is_saved_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let reporter = Reporter::new(Vec::new(), false, Some(dir.path().to_path_buf()));
        let markup = "\n<html> exact </html>\r\n";
        reporter.report("alpha", &success(None, markup));

        let saved = std::fs::read_to_string(dir.path().join("alpha.html")).unwrap();
        assert_eq!(saved, markup);
    }

    #[test]
    fn failures_write_no_markup() {
        let dir = tempfile::TempDir::new().unwrap();
        let reporter = Reporter::new(Vec::new(), false, Some(dir.path().to_path_buf()));
        reporter.report(
            "alpha",
            &FetchResult::Failure(FetchError::DocumentRetrieval {
                url: "https://instagram.com/alpha".into(),
            }),
        );
        assert!(!dir.path().join("alpha.html").exists());
    }
}
