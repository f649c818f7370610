// Date range filter, inclusive at both ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FilterableItem, ScoredItem};

/// Inclusive bounds in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    pub start_date_time_ms: i64,
    pub end_date_time_ms: i64,
}

impl DateFilter {
    pub fn new(start_date_time_ms: i64, end_date_time_ms: i64) -> Self {
        Self {
            start_date_time_ms,
            end_date_time_ms,
        }
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        let ms = date.timestamp_millis();
        self.start_date_time_ms <= ms && ms <= self.end_date_time_ms
    }
}

pub fn item_meets_date_filters<T: FilterableItem>(
    item: &ScoredItem<T>,
    filter: Option<&DateFilter>,
) -> bool {
    match filter {
        Some(f) => f.contains(item.item.date()),
        None => true,
    }
}
