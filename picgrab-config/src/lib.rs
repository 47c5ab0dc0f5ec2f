//! Loader for picgrab configuration with YAML + environment overlays.
//!
//! Sources are merged in the order they are added, with `PICGRAB__`-prefixed
//! environment variables always on top (`PICGRAB__BROWSER__HEADLESS=false`).
//! String values may reference `${VAR}` placeholders which are expanded after
//! merging. Every field has a default, so an empty document is a valid config.
use config::{Config, ConfigError, Environment, File};
use picgrab_common::StealthLevel;
use picgrab_common::observability::{LogConfig, LogFormat};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
pub struct PicgrabConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where profiles are fetched from and how long a fetch may take.
#[derive(Debug, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    #[serde(default)]
    pub stealth: StealthLevel,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            stealth: StealthLevel::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub stderr: bool,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::default(),
            stderr: false,
            filter: default_filter(),
        }
    }
}

impl LoggingConfig {
    /// Turn the file-level settings into an observability [`LogConfig`].
    pub fn to_log_config(&self, app_name: &str) -> LogConfig {
        LogConfig {
            app_name: app_name.to_string(),
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn default_host() -> String {
    "instagram.com".into()
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_headless() -> bool {
    true
}
fn default_filter() -> String {
    "info".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct PicgrabConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PicgrabConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PicgrabConfigLoader {
    /// Start with no files; only `PICGRAB__` env overrides are registered.
    ///
    /// ```
    /// use picgrab_config::PicgrabConfigLoader;
    ///
    /// let config = PicgrabConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.profile.host, "instagram.com");
    /// assert!(config.browser.headless);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when missing, so deployments can
    /// rely purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use picgrab_common::StealthLevel;
    /// use picgrab_config::PicgrabConfigLoader;
    ///
    /// let cfg = PicgrabConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// profile:
    ///   host: "example.com"
    ///   timeout_secs: 15
    /// browser:
    ///   stealth: "maximum"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.profile.host, "example.com");
    /// assert_eq!(cfg.profile.timeout_secs, Some(15));
    /// assert_eq!(cfg.browser.stealth, StealthLevel::Maximum);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// Environment variables are layered last, then `${VAR}` placeholders are
    /// expanded before materialising the structs.
    pub fn load(self) -> Result<PicgrabConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("PICGRAB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}
