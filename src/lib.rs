// FeedShield: comment filtering and report aggregation for abuse triage.
//
// This is the library root. Filtering and report aggregation are pure
// functions over in-memory items; the binary in main.rs handles loading
// files and printing results.

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod output;
pub mod report;
pub mod sort;

pub use error::FilterError;
pub use filters::{apply_comment_filters, FilterSet};
pub use models::{FilterableItem, ScoredItem, Scores, SocialMediaItem};
pub use report::{compute_report_summary, ReportSummary};
