// Ordering for display. Filtering preserves input order; sorting is an
// explicit, separate step applied afterwards.

use std::cmp::Ordering;

use crate::models::{FilterableItem, ScoredItem, SocialMediaItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Most toxic first; unscored items last.
    #[default]
    Priority,
    /// Newest first.
    Time,
    /// Most likes + retweets first.
    Popularity,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Priority => "priority",
            SortOption::Time => "time",
            SortOption::Popularity => "popularity",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "priority" => Some(SortOption::Priority),
            "time" => Some(SortOption::Time),
            "popularity" => Some(SortOption::Popularity),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Return the items reordered by `option`. The sort is stable, so ties keep
/// their input order.
pub fn sort_items<'a>(
    items: &[&'a ScoredItem<SocialMediaItem>],
    option: SortOption,
) -> Vec<&'a ScoredItem<SocialMediaItem>> {
    let mut sorted = items.to_vec();
    match option {
        SortOption::Priority => sorted.sort_by(|a, b| compare_toxicity_desc(*a, *b)),
        SortOption::Time => sorted.sort_by_key(|s| std::cmp::Reverse(s.item.date())),
        SortOption::Popularity => sorted.sort_by_key(|s| std::cmp::Reverse(s.item.engagement())),
    }
    sorted
}

fn compare_toxicity_desc<T>(a: &ScoredItem<T>, b: &ScoredItem<T>) -> Ordering {
    match (a.scores.toxicity(), b.scores.toxicity()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
