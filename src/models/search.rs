//! Ordering options for publication lists.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use super::{Publication, Reported};

/// Sort order for a publication list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most cited first
    Popular,
    /// Newest year first
    Latest,
    /// Oldest year first
    Oldest,
}

impl SortBy {
    /// Sort publications in place.
    ///
    /// The sort is stable and `Unknown` values always go last, whatever the direction.
    pub fn apply(&self, publications: &mut [Publication]) {
        match self {
            SortBy::Popular => {
                publications.sort_by(|a, b| unknown_last(&a.citations, &b.citations, true))
            }
            SortBy::Latest => publications.sort_by(|a, b| unknown_last(&a.year, &b.year, true)),
            SortBy::Oldest => publications.sort_by(|a, b| unknown_last(&a.year, &b.year, false)),
        }
    }
}

fn unknown_last<T: Ord>(a: &Reported<T>, b: &Reported<T>, descending: bool) -> Ordering {
    match (a.known(), b.known()) {
        (Some(x), Some(y)) if descending => y.cmp(x),
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl FromStr for SortBy {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" => Ok(SortBy::Popular),
            "latest" => Ok(SortBy::Latest),
            "oldest" => Ok(SortBy::Oldest),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Returned when a sort key is not one of `popular`, `latest` or `oldest`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key '{0}', expected one of: popular, latest, oldest")]
pub struct UnknownSortKey(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    fn publication(title: &str, year: Reported<i32>, citations: Reported<u64>) -> Publication {
        Publication {
            title: title.to_string(),
            link: "No URL".to_string(),
            year,
            citations,
        }
    }

    fn titles(publications: &[Publication]) -> Vec<&str> {
        publications.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_sort_popular_puts_unknown_last() {
        let mut list = vec![
            publication("a", Reported::Known(2001), Reported::Unknown),
            publication("b", Reported::Known(2002), Reported::Known(3)),
            publication("c", Reported::Known(2003), Reported::Known(40)),
        ];
        SortBy::Popular.apply(&mut list);
        assert_eq!(titles(&list), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_sort_by_year_both_directions() {
        let mut list = vec![
            publication("old", Reported::Known(1999), Reported::Unknown),
            publication("none", Reported::Unknown, Reported::Unknown),
            publication("new", Reported::Known(2021), Reported::Unknown),
        ];

        SortBy::Latest.apply(&mut list);
        assert_eq!(titles(&list), vec!["new", "old", "none"]);

        SortBy::Oldest.apply(&mut list);
        assert_eq!(titles(&list), vec!["old", "new", "none"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut list = vec![
            publication("first", Reported::Known(2010), Reported::Known(5)),
            publication("second", Reported::Known(2010), Reported::Known(5)),
        ];
        SortBy::Latest.apply(&mut list);
        assert_eq!(titles(&list), vec!["first", "second"]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("popular".parse::<SortBy>().unwrap(), SortBy::Popular);
        assert_eq!(" Latest ".parse::<SortBy>().unwrap(), SortBy::Latest);
        assert_eq!("oldest".parse::<SortBy>().unwrap(), SortBy::Oldest);
        assert!("relevance".parse::<SortBy>().is_err());
    }
}
