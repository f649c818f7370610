// Report aggregation — summary statistics for a finalized selection of items.
//
// The summary is recomputed from scratch on every call. Callers must
// recompute after adding or removing items.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{non_blank, FilterableItem, ScoredItem, SocialMediaItem};

/// An attribute counts as a toxicity type for the report once any item
/// scores strictly above this.
pub const TOXICITY_TYPE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// Mean TOXICITY over the items that have one. NaN when none do.
    pub average_toxicity: f64,
    /// Attribute names some item scored above the threshold on.
    pub toxicity_types: BTreeSet<String>,
    /// Author screen name -> number of items in the report.
    pub users_in_report: BTreeMap<String, usize>,
    pub item_count: usize,
}

impl ReportSummary {
    /// Whether any item had a TOXICITY score to average.
    pub fn has_average(&self) -> bool {
        !self.average_toxicity.is_nan()
    }
}

/// Summarize the items selected for a report in a single pass.
///
/// Accepts anything yielding item references, so both `&Vec<ScoredItem>` and
/// the `Vec<&ScoredItem>` returned by filtering can be passed directly.
pub fn compute_report_summary<'a, T, I>(items: I) -> ReportSummary
where
    T: FilterableItem + 'a,
    I: IntoIterator<Item = &'a ScoredItem<T>>,
{
    let mut item_count = 0usize;
    let mut toxicity_sum = 0.0;
    let mut toxicity_count = 0usize;
    let mut toxicity_types = BTreeSet::new();
    let mut users_in_report: BTreeMap<String, usize> = BTreeMap::new();

    for scored in items {
        item_count += 1;

        if let Some(toxicity) = scored.scores.toxicity() {
            toxicity_sum += toxicity;
            toxicity_count += 1;
        }

        for (attribute, score) in scored.scores.iter() {
            if score > TOXICITY_TYPE_THRESHOLD {
                toxicity_types.insert(attribute.to_string());
            }
        }

        if let Some(screen_name) = non_blank(scored.item.author_screen_name()) {
            *users_in_report.entry(screen_name.to_string()).or_insert(0) += 1;
        }
    }

    // 0.0 / 0 is NaN, which is what callers expect for "no scores".
    let average_toxicity = toxicity_sum / toxicity_count as f64;

    ReportSummary {
        average_toxicity,
        toxicity_types,
        users_in_report,
        item_count,
    }
}

/// The items whose ids appear in `ids`, in input order.
pub fn select_report_items<'a, I>(
    items: I,
    ids: &[String],
) -> Vec<&'a ScoredItem<SocialMediaItem>>
where
    I: IntoIterator<Item = &'a ScoredItem<SocialMediaItem>>,
{
    let wanted: BTreeSet<&str> = ids.iter().map(String::as_str).collect();
    items
        .into_iter()
        .filter(|scored| wanted.contains(scored.item.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let items: Vec<ScoredItem> = Vec::new();
        let summary = compute_report_summary(&items);
        assert!(summary.average_toxicity.is_nan());
        assert!(!summary.has_average());
        assert!(summary.toxicity_types.is_empty());
        assert!(summary.users_in_report.is_empty());
        assert_eq!(summary.item_count, 0);
    }
}
