// Regex include/exclude filters over post text and author fields.
//
// Include filters AND together ("must contain all of these"). Exclude filters
// AND their negations ("must contain none of these"). Matching is
// case-insensitive and unanchored.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::models::{non_blank, FilterableItem, ScoredItem};

/// A user-supplied pattern and whether matching items are kept or dropped.
///
/// Patterns use the `regex` crate syntax. Case folding is Unicode-aware, but
/// look-around (`(?=…)`, `(?!…)`, `(?<=…)`) and backreferences are not
/// supported; such patterns fail with [`FilterError::InvalidFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexFilter {
    pub regex: String,
    pub include: bool,
}

impl RegexFilter {
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            regex: pattern.into(),
            include: true,
        }
    }

    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            regex: pattern.into(),
            include: false,
        }
    }

    /// Compile the pattern case-insensitively.
    pub fn compile(&self) -> Result<CompiledRegexFilter> {
        let regex = RegexBuilder::new(&self.regex)
            .case_insensitive(true)
            .build()
            .map_err(|source| FilterError::InvalidFilter {
                pattern: self.regex.clone(),
                source,
            })?;

        Ok(CompiledRegexFilter {
            regex,
            include: self.include,
        })
    }
}

/// A regex filter ready to evaluate against items.
#[derive(Debug, Clone)]
pub struct CompiledRegexFilter {
    regex: Regex,
    include: bool,
}

impl CompiledRegexFilter {
    pub fn is_include(&self) -> bool {
        self.include
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern occurs in the text or either author field.
    pub fn matches<T: FilterableItem>(&self, item: &T) -> bool {
        candidate_fields(item).any(|field| self.regex.is_match(field))
    }
}

/// Compile a list of filters, failing on the first bad pattern.
pub fn compile_regex_filters(filters: &[RegexFilter]) -> Result<Vec<CompiledRegexFilter>> {
    filters.iter().map(RegexFilter::compile).collect()
}

/// Check an item against compiled include/exclude filters.
pub fn item_meets_regex_filters<T: FilterableItem>(
    item: &ScoredItem<T>,
    filters: &[CompiledRegexFilter],
) -> bool {
    if filters.is_empty() {
        return true;
    }

    let (include, exclude): (Vec<_>, Vec<_>) = filters.iter().partition(|f| f.include);

    let includes_pass = include.iter().all(|f| f.matches(&item.item));
    let excludes_pass = !exclude.iter().any(|f| f.matches(&item.item));

    includes_pass && excludes_pass
}

// Blank author fields are skipped rather than matched against.
fn candidate_fields<T: FilterableItem>(item: &T) -> impl Iterator<Item = &str> {
    let authors = [item.author_name(), item.author_screen_name()]
        .into_iter()
        .filter_map(non_blank);

    std::iter::once(item.text()).chain(authors)
}
