//! Upstream sources of work records.
//!
//! The fetcher never talks to `reqwest` directly; it goes through the
//! [`WorksSource`] trait so the HTTP client can be swapped for a test double.
//!
//! - [`CrossRefSource`]: the CrossRef REST API (`/works?query.author=...`)
//! - [`MockWorksSource`]: canned pages for tests

mod crossref;
pub mod mock;

pub use crossref::CrossRefSource;
pub use mock::MockWorksSource;

use crate::models::WorksPage;
use async_trait::async_trait;

/// A single page request against a works search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Free-text author query
    pub author: String,

    /// Page size
    pub rows: usize,

    /// Number of records to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(author: impl Into<String>, rows: usize, offset: usize) -> Self {
        Self {
            author: author.into(),
            rows,
            offset,
        }
    }
}

/// Interface for anything that can serve pages of work records.
#[async_trait]
pub trait WorksSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Fetch one page of works matching the author query.
    ///
    /// `Ok(None)` means the response carried no result envelope, which callers
    /// treat as the end of the data.
    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<WorksPage>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (body is not JSON, or a record has unexpected types)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success status from the upstream API
    #[error("API error: {0}")]
    Api(String),

    /// Other error
    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
