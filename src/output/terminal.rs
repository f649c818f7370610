// Colored terminal output for filtered comment lists and report summaries.
//
// main.rs delegates all formatting here.

use colored::Colorize;

use crate::filters::ToxicityPreset;
use crate::models::{Attribute, ScoredItem, SocialMediaItem};
use crate::report::ReportSummary;

/// Display a filtered list of comments in the terminal.
pub fn display_items(items: &[&ScoredItem<SocialMediaItem>], total: usize) {
    if items.is_empty() {
        println!("No comments match the current filters ({total} loaded).");
        return;
    }

    println!(
        "\n{}",
        format!("=== Comments ({} of {} match) ===", items.len(), total).bold()
    );
    println!();

    println!(
        "  {:<10} {:<20} {:<24} {:>5}  {}",
        "Id".dimmed(),
        "Date".dimmed(),
        "Author".dimmed(),
        "Tox".dimmed(),
        "Text".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for scored in items {
        let post = &scored.item;
        let author = post
            .author_screen_name
            .as_deref()
            .map(|s| format!("@{s}"))
            .unwrap_or_else(|| "?".to_string());
        let toxicity = match scored.scores.toxicity() {
            Some(score) => colorize_toxicity(score),
            None => "--".dimmed(),
        };

        println!(
            "  {:<10} {:<20} {:<24} {:>5}  {}",
            super::truncate_chars(&post.id, 10),
            post.date.format("%Y-%m-%d %H:%M"),
            super::truncate_chars(&author, 24),
            toxicity,
            super::truncate_chars(&post.text, 80),
        );
    }
    println!();
}

/// Display the summary statistics for a report.
pub fn display_report_summary(summary: &ReportSummary) {
    println!(
        "\n{}",
        format!("=== Report Summary ({} comments) ===", summary.item_count).bold()
    );

    let average = super::format_percent(summary.average_toxicity);
    if summary.has_average() {
        println!("  Average toxicity: {}", average);
    } else {
        println!("  Average toxicity: {}", average.dimmed());
    }

    if summary.toxicity_types.is_empty() {
        println!("  Toxicity types: {}", "none".dimmed());
    } else {
        let labels: Vec<&str> = summary
            .toxicity_types
            .iter()
            .map(|name| Attribute::from_name(name).map_or(name.as_str(), |a| a.label()))
            .collect();
        println!("  Toxicity types: {}", labels.join(", "));
    }

    if summary.users_in_report.is_empty() {
        println!("  Users in report: {}", "none".dimmed());
    } else {
        let mut users: Vec<(&String, &usize)> = summary.users_in_report.iter().collect();
        // Most-reported authors first, then alphabetical
        users.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        println!("  Users in report: {}", users.len());
        for (user, count) in users {
            println!("    @{:<30} {:>4}", user, count);
        }
    }
    println!();
}

/// Color a toxicity score by the bucket it falls in.
fn colorize_toxicity(score: f64) -> colored::ColoredString {
    let text = format!("{:.2}", score);
    match ToxicityPreset::from_score(score) {
        Some(ToxicityPreset::Severe) => text.red().bold(),
        Some(ToxicityPreset::High) => text.bright_red(),
        Some(ToxicityPreset::Medium) => text.yellow(),
        Some(ToxicityPreset::Low) => text.green(),
        None => text.dimmed(),
    }
}
