//! Core data models for CrossRef works and normalized publications.

mod publication;
mod search;
mod work;

pub use publication::{Publication, Reported, NO_TITLE, NO_URL, UNKNOWN};
pub use search::{SortBy, UnknownSortKey};
pub use work::{RawAuthor, RawDate, RawItem, WorksPage};
