//! Publication model returned to the web page.

use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel used when a year or citation count is missing
pub const UNKNOWN: &str = "Unknown";

/// Sentinel used when a work has no usable title
pub const NO_TITLE: &str = "No title";

/// Sentinel used when a work has no URL
pub const NO_URL: &str = "No URL";

/// A value the upstream API may or may not have reported.
///
/// Serializes as the bare value when known, otherwise as the string `"Unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reported<T> {
    Known(T),
    Unknown,
}

impl<T> Reported<T> {
    /// Returns the known value, if any
    pub fn known(&self) -> Option<&T> {
        match self {
            Reported::Known(value) => Some(value),
            Reported::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Reported::Unknown)
    }
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Reported::Known(v),
            None => Reported::Unknown,
        }
    }
}

impl<T: Serialize> Serialize for Reported<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reported::Known(value) => value.serialize(serializer),
            Reported::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Reported<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reported::Known(value) => write!(f, "{}", value),
            Reported::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// A single publication, flattened from a CrossRef work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Publication {
    /// Title with trailing footnote markers removed
    pub title: String,

    /// Landing page URL, or `"No URL"`
    pub link: String,

    /// Year of issue
    pub year: Reported<i32>,

    /// Number of works citing this one
    pub citations: Reported<u64>,
}
