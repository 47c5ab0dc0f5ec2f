//! Instagram profile picture lookup.
//!
//! - [`fetcher::ProfileFetcher`]: the single entry point, one fetch per username
//! - [`render`]: the rendering-engine capability and its fantoccini implementation
//! - [`extract`]: the fixed substring heuristic that locates the picture link
//! - [`types`]: the result type and error taxonomy
pub mod extract;
pub mod fetcher;
pub mod render;
pub mod types;

pub use fetcher::{DEFAULT_HOST, ProfileFetcher};
pub use render::{FantocciniEngine, RenderSurface, RenderingEngine};
pub use types::{FetchError, FetchListener, FetchResult};
