// Comment filtering — narrows a list of scored items to those passing every
// active filter category.
//
// Categories combine with AND. A category that isn't configured places no
// constraint. Filtering never reorders, duplicates or mutates items.

pub mod date;
pub mod pattern;
pub mod toxicity;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::models::{FilterableItem, ScoredItem};

pub use date::{item_meets_date_filters, DateFilter};
pub use pattern::{
    compile_regex_filters, item_meets_regex_filters, CompiledRegexFilter, RegexFilter,
};
pub use toxicity::{item_meets_toxicity_range_filters, ToxicityPreset, ToxicityRangeFilter};

/// The full set of user-configured filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSet {
    pub toxicity_range_filters: Vec<ToxicityRangeFilter>,
    pub regex_filters: Vec<RegexFilter>,
    pub date_filter: Option<DateFilter>,
    pub image_filter: bool,
    pub verified_filter: bool,
}

impl FilterSet {
    /// True when no category is active, so filtering is the identity.
    pub fn is_empty(&self) -> bool {
        self.toxicity_range_filters.is_empty()
            && self.regex_filters.is_empty()
            && self.date_filter.is_none()
            && !self.image_filter
            && !self.verified_filter
    }

    /// Fold another set into this one. List categories are concatenated,
    /// flags are OR-ed, and `other`'s date filter wins when present.
    pub fn merge(mut self, other: FilterSet) -> Self {
        self.toxicity_range_filters.extend(other.toxicity_range_filters);
        self.regex_filters.extend(other.regex_filters);
        if other.date_filter.is_some() {
            self.date_filter = other.date_filter;
        }
        self.image_filter |= other.image_filter;
        self.verified_filter |= other.verified_filter;
        self
    }

    /// Compile the regex patterns so the set can be evaluated.
    pub fn compile(&self) -> Result<CompiledFilterSet> {
        Ok(CompiledFilterSet {
            toxicity_range_filters: self.toxicity_range_filters.clone(),
            regex_filters: compile_regex_filters(&self.regex_filters)?,
            date_filter: self.date_filter,
            image_filter: self.image_filter,
            verified_filter: self.verified_filter,
        })
    }
}

/// A filter set whose patterns compiled successfully.
#[derive(Debug, Clone)]
pub struct CompiledFilterSet {
    toxicity_range_filters: Vec<ToxicityRangeFilter>,
    regex_filters: Vec<CompiledRegexFilter>,
    date_filter: Option<DateFilter>,
    image_filter: bool,
    verified_filter: bool,
}

impl CompiledFilterSet {
    /// Whether a single item passes every category.
    pub fn matches<T: FilterableItem>(&self, item: &ScoredItem<T>) -> bool {
        item_meets_toxicity_range_filters(item, &self.toxicity_range_filters)
            && item_meets_regex_filters(item, &self.regex_filters)
            && item_meets_date_filters(item, self.date_filter.as_ref())
            && item_meets_image_filter(item, self.image_filter)
            && item_meets_verified_filter(item, self.verified_filter)
    }

    /// The subsequence of `items` passing every category, in input order.
    pub fn apply<'a, T: FilterableItem>(
        &self,
        items: &'a [ScoredItem<T>],
    ) -> Vec<&'a ScoredItem<T>> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

pub fn item_meets_image_filter<T: FilterableItem>(
    item: &ScoredItem<T>,
    image_filter: bool,
) -> bool {
    !image_filter || item.item.has_image()
}

pub fn item_meets_verified_filter<T: FilterableItem>(
    item: &ScoredItem<T>,
    verified_filter: bool,
) -> bool {
    !verified_filter || item.item.verified()
}

/// Compile `filters` and apply them to `items`.
///
/// Fails only if a regex pattern is invalid, in which case no item is
/// evaluated.
pub fn apply_comment_filters<'a, T: FilterableItem>(
    items: &'a [ScoredItem<T>],
    filters: &FilterSet,
) -> Result<Vec<&'a ScoredItem<T>>> {
    let compiled = filters.compile()?;
    let kept = compiled.apply(items);

    debug!(
        input = items.len(),
        kept = kept.len(),
        toxicity_ranges = filters.toxicity_range_filters.len(),
        regex_filters = filters.regex_filters.len(),
        date_filter = filters.date_filter.is_some(),
        "Applied comment filters"
    );

    Ok(kept)
}
