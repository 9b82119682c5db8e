//! Author filter.

use crate::config::FilterConfig;
use crate::models::{RawAuthor, RawItem};

/// Keeps works that list one specific person among their authors.
///
/// An author entry matches when its family name contains the family token and its
/// given name contains the given token, both compared case-insensitively as
/// substrings. The tokens come from configuration, never from the search query,
/// so a query for another name still only yields this person's works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorMatcher {
    family: String,
    given: String,
}

impl AuthorMatcher {
    pub fn new(family: &str, given: &str) -> Self {
        Self {
            family: family.to_lowercase(),
            given: given.to_lowercase(),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(&config.family, &config.given)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn given(&self) -> &str {
        &self.given
    }

    /// Missing name parts compare as empty strings.
    pub fn matches_author(&self, author: &RawAuthor) -> bool {
        let family = author.family.as_deref().unwrap_or_default().to_lowercase();
        let given = author.given.as_deref().unwrap_or_default().to_lowercase();
        family.contains(&self.family) && given.contains(&self.given)
    }

    /// True when at least one author entry matches both tokens.
    pub fn matches(&self, item: &RawItem) -> bool {
        item.authors().iter().any(|author| self.matches_author(author))
    }
}

impl Default for AuthorMatcher {
    fn default() -> Self {
        Self::from_config(&FilterConfig::default())
    }
}
