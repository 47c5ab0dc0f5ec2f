//! Social network profile scraping used by picgrab.
//!
//! Currently only the Instagram profile pipeline is implemented: render the
//! public profile page in a real browser, then pull the profile picture link
//! out of the markup.
pub mod instagram;
