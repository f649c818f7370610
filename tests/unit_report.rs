// Unit tests for report aggregation and item selection.

use chrono::Utc;
use feedshield::models::{ScoredItem, Scores, SocialMediaItem};
use feedshield::output::format_percent;
use feedshield::report::{compute_report_summary, select_report_items, TOXICITY_TYPE_THRESHOLD};

fn item(id: &str, screen_name: Option<&str>, scores: Scores) -> ScoredItem {
    ScoredItem::new(
        SocialMediaItem {
            id: id.to_string(),
            text: format!("comment {id}"),
            date: Utc::now(),
            author_name: None,
            author_screen_name: screen_name.map(str::to_string),
            has_image: None,
            verified: None,
            favorite_count: None,
            retweet_count: None,
        },
        scores,
    )
}

// ============================================================
// Average toxicity
// ============================================================

#[test]
fn empty_list_has_nan_average_and_no_stats() {
    let items: Vec<ScoredItem> = Vec::new();
    let summary = compute_report_summary(&items);
    assert!(summary.average_toxicity.is_nan());
    assert!(summary.toxicity_types.is_empty());
    assert!(summary.users_in_report.is_empty());
}

#[test]
fn all_unscored_has_nan_average() {
    let items = vec![
        item("a", Some("x"), Scores::new()),
        item("b", Some("y"), Scores::new().with("INSULT", 0.2)),
    ];
    let summary = compute_report_summary(&items);
    assert!(summary.average_toxicity.is_nan());
    assert_eq!(format_percent(summary.average_toxicity), "–%");
}

#[test]
fn average_skips_unscored_items() {
    let items = vec![
        item("a", None, Scores::new().with("TOXICITY", 0.9)),
        item("b", None, Scores::new()),
        item("c", None, Scores::new().with("TOXICITY", 0.5)),
    ];
    let summary = compute_report_summary(&items);
    assert!(
        (summary.average_toxicity - 0.7).abs() < 1e-9,
        "Expected 0.7, got {}",
        summary.average_toxicity
    );
    assert_eq!(summary.item_count, 3);
}

#[test]
fn zero_toxicity_counts_toward_average() {
    let items = vec![
        item("a", None, Scores::new().with("TOXICITY", 0.0)),
        item("b", None, Scores::new().with("TOXICITY", 0.6)),
    ];
    let summary = compute_report_summary(&items);
    assert!((summary.average_toxicity - 0.3).abs() < 1e-9);
}

// ============================================================
// Toxicity types
// ============================================================

#[test]
fn toxicity_types_are_attributes_above_threshold() {
    let items = vec![
        item(
            "a",
            None,
            Scores::new().with("TOXICITY", 0.4).with("INSULT", 0.7),
        ),
        item(
            "b",
            None,
            Scores::new().with("THREAT", 0.51).with("PROFANITY", 0.3),
        ),
    ];
    let summary = compute_report_summary(&items);
    let types: Vec<&str> = summary.toxicity_types.iter().map(String::as_str).collect();
    assert_eq!(types, vec!["INSULT", "THREAT"]);
}

#[test]
fn toxicity_type_threshold_is_strict() {
    let items = vec![item(
        "a",
        None,
        Scores::new().with("INSULT", TOXICITY_TYPE_THRESHOLD),
    )];
    let summary = compute_report_summary(&items);
    assert!(summary.toxicity_types.is_empty());
}

#[test]
fn toxicity_itself_counts_as_a_type() {
    let items = vec![item("a", None, Scores::new().with("TOXICITY", 0.95))];
    let summary = compute_report_summary(&items);
    assert!(summary.toxicity_types.contains("TOXICITY"));
}

// ============================================================
// Users in report
// ============================================================

#[test]
fn users_counted_by_screen_name() {
    let items = vec![
        item("a", Some("troll"), Scores::new()),
        item("b", Some("troll"), Scores::new()),
        item("c", Some("other"), Scores::new()),
        item("d", None, Scores::new()),
    ];
    let summary = compute_report_summary(&items);
    assert_eq!(summary.users_in_report.len(), 2);
    assert_eq!(summary.users_in_report["troll"], 2);
    assert_eq!(summary.users_in_report["other"], 1);
}

#[test]
fn blank_screen_names_are_not_users() {
    let items = vec![
        item("a", Some("  "), Scores::new()),
        item("b", Some(""), Scores::new()),
        item("c", Some("troll"), Scores::new()),
    ];
    let summary = compute_report_summary(&items);
    assert_eq!(summary.users_in_report.len(), 1);
    assert_eq!(summary.users_in_report["troll"], 1);
    assert_eq!(summary.item_count, 3);
}

#[test]
fn summary_accepts_item_references() {
    let items = vec![
        item("a", Some("troll"), Scores::new().with("TOXICITY", 0.8)),
        item("b", Some("other"), Scores::new().with("TOXICITY", 0.2)),
    ];
    let refs: Vec<&ScoredItem> = items.iter().rev().collect();
    let summary = compute_report_summary(refs);
    assert_eq!(summary.item_count, 2);
    assert!((summary.average_toxicity - 0.5).abs() < 1e-9);
}

#[test]
fn summary_is_recomputed_after_removal() {
    let mut items = vec![
        item("a", Some("troll"), Scores::new().with("TOXICITY", 0.9)),
        item("b", Some("other"), Scores::new().with("TOXICITY", 0.1)),
    ];
    let before = compute_report_summary(&items);
    assert_eq!(before.users_in_report.len(), 2);

    items.remove(0);
    let after = compute_report_summary(&items);
    assert_eq!(after.users_in_report.len(), 1);
    assert!((after.average_toxicity - 0.1).abs() < 1e-9);
    assert!(!after.toxicity_types.contains("TOXICITY"));
}

// ============================================================
// Selecting report items by id
// ============================================================

#[test]
fn select_keeps_input_order() {
    let items = vec![
        item("a", None, Scores::new()),
        item("b", None, Scores::new()),
        item("c", None, Scores::new()),
    ];
    let ids = vec!["c".to_string(), "a".to_string(), "missing".to_string()];
    let selected: Vec<&str> = select_report_items(&items, &ids)
        .iter()
        .map(|s| s.item.id.as_str())
        .collect();
    assert_eq!(selected, vec!["a", "c"]);
}
