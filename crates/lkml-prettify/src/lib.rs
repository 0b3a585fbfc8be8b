//! lkml-prettify - Styled diff view of kernel mailing list threads.
//!
//! This crate provides a small HTTP server with a single form. A submitted
//! thread URL is fetched from the lore.kernel.org LKML archive, stripped of
//! HTML tags, and reduced to its diff lines, each rendered as a styled
//! `<pre>` block.
//!
//! # Architecture
//!
//! - **Validate**: Only URLs under a trusted archive prefix are fetched
//! - **Fetch**: GET the thread with reqwest; a 404 means "no result"
//! - **Markup**: Naive tag stripping plus per-line diff classification
//! - **Render**: Form page and error pages using maud
//! - **Cache**: In-process moka cache of prettified threads keyed by URL
//!
//! # URL Pattern
//!
//! ```text
//! GET /?q=https://lore.kernel.org/lkml/<message-id>
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod markup;
pub mod render;
pub mod routes;
pub mod state;
pub mod validate;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
