//! Common types and utilities shared across picgrab crates.
//!
//! This crate defines the shared error type, the browser stealth level and the
//! observability helpers used throughout the workspace. It stays
//! dependency‑minimal so every crate can depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`PicgrabError`] and [`Result`]: Shared error handling
//! - [`StealthLevel`]: how hard the browser driver works to look like a person
//!
//! # Examples
//!
//! ```rust
//! use picgrab_common::{PicgrabError, StealthLevel};
//!
//! assert_eq!(StealthLevel::default(), StealthLevel::Balanced);
//! assert_eq!(PicgrabError::Timeout.to_string(), "Timeout occurred");
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Browser automation stealth level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StealthLevel {
    Lightweight,
    #[default]
    Balanced,
    Maximum,
}

/// Error types used across the picgrab workspace.
#[derive(thiserror::Error, Debug)]
pub enum PicgrabError {
    /// A driver (browser, WebDriver session, etc.) reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation exceeded the configured timeout.
    #[error("Timeout occurred")]
    Timeout,
}

/// Convenient alias for results that use [`PicgrabError`].
pub type Result<T> = std::result::Result<T, PicgrabError>;
