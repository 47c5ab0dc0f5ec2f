//! Driver layer for browser automation.
//!
//! This crate exposes the WebDriver-backed browser used to render profile
//! pages with their scripts executed.
//!
//! - [`picgrab_browser::driver::PicgrabDriver`]: WebDriver client wrapper
//! - [`picgrab_browser::page::PicgrabPage`]: navigation and document access
//! - [`picgrab_browser::behavioral::BehavioralEngine`]: human‑like timings
//! - [`picgrab_browser::stealth`]: Chrome arguments and JS evasions
pub mod picgrab_browser;
