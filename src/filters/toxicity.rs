// Toxicity range filters.
//
// A range is half-open at the top so adjacent ranges sharing a boundary never
// both claim the same score. The one exception is a range ending at 1.0,
// which must still capture a perfect score of exactly 1.0.

use serde::{Deserialize, Serialize};

use crate::models::ScoredItem;

/// An acceptance interval over the TOXICITY score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicityRangeFilter {
    pub min_score: f64,
    pub max_score: f64,
    /// Whether items with no TOXICITY score pass this filter.
    #[serde(default)]
    pub include_unscored: bool,
}

impl ToxicityRangeFilter {
    pub fn new(min_score: f64, max_score: f64, include_unscored: bool) -> Self {
        Self {
            min_score,
            max_score,
            include_unscored,
        }
    }

    /// Whether a present score falls inside this range.
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score
            && (score < self.max_score || (self.max_score == 1.0 && score == 1.0))
    }
}

/// Check an item against a list of ranges, combined with OR.
///
/// An empty list places no constraint. An unscored item passes only if some
/// range opts in to unscored items.
pub fn item_meets_toxicity_range_filters<T>(
    item: &ScoredItem<T>,
    filters: &[ToxicityRangeFilter],
) -> bool {
    if filters.is_empty() {
        return true;
    }

    match item.scores.toxicity() {
        None => filters.iter().any(|f| f.include_unscored),
        Some(score) => filters.iter().any(|f| f.contains(score)),
    }
}

/// Named toxicity buckets offered as shortcuts on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToxicityPreset {
    Low,
    Medium,
    High,
    Severe,
}

impl ToxicityPreset {
    pub const ALL: [ToxicityPreset; 4] = [
        ToxicityPreset::Low,
        ToxicityPreset::Medium,
        ToxicityPreset::High,
        ToxicityPreset::Severe,
    ];

    /// The (min, max) bounds of this bucket. Buckets tile [0, 1] exactly.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            ToxicityPreset::Low => (0.0, 0.5),
            ToxicityPreset::Medium => (0.5, 0.7),
            ToxicityPreset::High => (0.7, 0.85),
            ToxicityPreset::Severe => (0.85, 1.0),
        }
    }

    pub fn filter(&self, include_unscored: bool) -> ToxicityRangeFilter {
        let (min, max) = self.bounds();
        ToxicityRangeFilter::new(min, max, include_unscored)
    }

    /// The bucket a score falls into, or `None` for out-of-range values.
    pub fn from_score(score: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.filter(false).contains(score))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToxicityPreset::Low => "low",
            ToxicityPreset::Medium => "medium",
            ToxicityPreset::High => "high",
            ToxicityPreset::Severe => "severe",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

impl std::fmt::Display for ToxicityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
