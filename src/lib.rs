//! # pubfetch
//!
//! A small web backend that aggregates one author's publications from the
//! CrossRef works API and serves them as JSON for a web page.
//!
//! ## Architecture
//!
//! - [`models`]: CrossRef response types and the flattened [`Publication`]
//! - [`sources`]: the [`WorksSource`] trait, the CrossRef client and a mock
//! - [`fetcher`]: pagination, author filtering, title cleanup, normalization
//! - [`server`]: axum routes
//! - [`config`]: layered configuration
//! - [`utils`]: HTTP client

pub mod config;
pub mod fetcher;
pub mod models;
pub mod server;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use fetcher::PublicationFetcher;
pub use models::Publication;
pub use sources::{CrossRefSource, WorksSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
