//! Publication fetching: pagination, author filtering and normalization.
//!
//! [`PublicationFetcher::fetch_publications`] walks the works search page by page,
//! keeps the records that [`AuthorMatcher`] accepts, and flattens each one with
//! [`normalize`]. Pagination ends on the first short page, on a response without a
//! result envelope, or when the page or time bound in [`FetchOptions`] is reached.

mod filter;
mod normalize;
mod title;

pub use filter::AuthorMatcher;
pub use normalize::normalize;
pub use title::{clean_title, truncate_at_nbsp_marker, truncate_at_number_marker};

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{Config, CrossRefConfig};
use crate::models::Publication;
use crate::sources::{PageRequest, SourceError, WorksSource};

/// Pagination settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Records per page
    pub rows: usize,
    /// Maximum pages requested per query
    pub max_pages: usize,
    /// Maximum wall time spent on one query
    pub max_total_time: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&CrossRefConfig::default())
    }
}

impl From<&CrossRefConfig> for FetchOptions {
    fn from(config: &CrossRefConfig) -> Self {
        Self {
            rows: config.rows,
            max_pages: config.max_pages,
            max_total_time: config.max_total_time(),
        }
    }
}

/// Aggregates an author's publications from a [`WorksSource`].
#[derive(Debug, Clone)]
pub struct PublicationFetcher {
    source: Arc<dyn WorksSource>,
    matcher: AuthorMatcher,
    options: FetchOptions,
}

impl PublicationFetcher {
    pub fn new(source: Arc<dyn WorksSource>, matcher: AuthorMatcher, options: FetchOptions) -> Self {
        Self {
            source,
            matcher,
            options,
        }
    }

    /// Build a fetcher with the matcher and pagination settings from `config`.
    pub fn from_config(source: Arc<dyn WorksSource>, config: &Config) -> Self {
        Self::new(
            source,
            AuthorMatcher::from_config(&config.filter),
            FetchOptions::from(&config.crossref),
        )
    }

    /// Fetch every page for `author` and return the matching publications in upstream order.
    ///
    /// Upstream failures abort the whole query. Reaching `max_pages` or
    /// `max_total_time` is not an error: whatever was collected is returned.
    pub async fn fetch_publications(&self, author: &str) -> Result<Vec<Publication>, SourceError> {
        let FetchOptions {
            rows,
            max_pages,
            max_total_time,
        } = self.options;

        if rows == 0 {
            return Err(SourceError::InvalidRequest(
                "page size must be greater than zero".to_string(),
            ));
        }

        let started = Instant::now();
        let mut publications = Vec::new();
        let mut offset = 0;
        let mut pages = 0;
        let mut exhausted = false;

        while pages < max_pages {
            let remaining = max_total_time.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                tracing::warn!(
                    author,
                    pages,
                    "Time budget of {:?} spent, returning partial results",
                    max_total_time
                );
                break;
            }

            let request = PageRequest::new(author, rows, offset);
            let page =
                match tokio::time::timeout(remaining, self.source.fetch_page(&request)).await {
                    Ok(result) => result?,
                    Err(_) => {
                        tracing::warn!(
                            author,
                            offset,
                            "Time budget of {:?} spent waiting on {}, returning partial results",
                            max_total_time,
                            self.source.name()
                        );
                        break;
                    }
                };
            pages += 1;

            let Some(page) = page else {
                tracing::debug!(author, offset, "Response has no result envelope");
                exhausted = true;
                break;
            };

            let received = page.items.len();
            let before = publications.len();
            publications.extend(
                page.items
                    .iter()
                    .filter(|item| self.matcher.matches(item))
                    .map(normalize),
            );
            tracing::debug!(
                author,
                offset,
                received,
                kept = publications.len() - before,
                "Fetched page {}",
                pages
            );

            if received < rows {
                exhausted = true;
                break;
            }
            offset += rows;
        }

        if !exhausted && pages == max_pages {
            tracing::warn!(
                author,
                "Stopped after {} pages without reaching the end of results",
                max_pages
            );
        }

        tracing::info!(
            author,
            pages,
            count = publications.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Collected publications from {}",
            self.source.name()
        );

        Ok(publications)
    }
}
