//! Flattening of CrossRef work records into [`Publication`]s.

use crate::models::{Publication, RawItem, Reported, NO_TITLE, NO_URL};

use super::title::clean_title;

/// Map a work record to the output shape, substituting sentinels for missing fields.
pub fn normalize(item: &RawItem) -> Publication {
    let title = item
        .first_title()
        .filter(|title| !title.trim().is_empty())
        .map(clean_title)
        .unwrap_or_else(|| NO_TITLE.to_string());

    let link = item.url.clone().unwrap_or_else(|| NO_URL.to_string());

    Publication {
        title,
        link,
        year: Reported::from(item.year()),
        citations: Reported::from(item.is_referenced_by_count),
    }
}
