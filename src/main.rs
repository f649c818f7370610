use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use feedshield::config::Config;
use feedshield::filters::{
    apply_comment_filters, DateFilter, FilterSet, RegexFilter, ToxicityPreset,
    ToxicityRangeFilter,
};
use feedshield::models::{ScoredItem, SocialMediaItem};
use feedshield::report::{compute_report_summary, select_report_items};
use feedshield::sort::{sort_items, SortOption};

/// FeedShield: triage abusive comments and summarize reports.
///
/// Loads comments already scored by a moderation provider, narrows them with
/// toxicity, text, date and account filters, and summarizes a selection for
/// reporting.
#[derive(Parser)]
#[command(name = "feedshield", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the comments that pass every filter
    Filter {
        #[command(flatten)]
        filters: FilterArgs,

        /// Ordering: priority, time or popularity (default from FEEDSHIELD_SORT)
        #[arg(long)]
        sort: Option<String>,

        /// Print matching items as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summarize comments selected for a report
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        /// Only include these item ids (comma separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// JSON array of scored items (default from FEEDSHIELD_ITEMS_PATH)
    #[arg(long)]
    items: Option<PathBuf>,

    /// JSON filter set to start from (default from FEEDSHIELD_FILTERS_PATH)
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Toxicity range as MIN-MAX, e.g. 0.8-1 (repeatable, OR-ed)
    #[arg(long = "toxicity")]
    toxicity: Vec<String>,

    /// Named toxicity range: low, medium, high, severe (repeatable, OR-ed)
    #[arg(long = "range")]
    ranges: Vec<String>,

    /// Let comments without a toxicity score through the toxicity ranges
    #[arg(long)]
    include_unscored: bool,

    /// Keep only comments matching this pattern (repeatable, AND-ed)
    #[arg(long = "include")]
    include: Vec<String>,

    /// Drop comments matching this pattern (repeatable)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Earliest comment time, RFC 3339 or epoch milliseconds
    #[arg(long)]
    since: Option<String>,

    /// Latest comment time, RFC 3339 or epoch milliseconds
    #[arg(long)]
    until: Option<String>,

    /// Only comments with images
    #[arg(long)]
    images: bool,

    /// Only comments from verified accounts
    #[arg(long)]
    verified: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedshield=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Filter {
            filters,
            sort,
            json,
        } => {
            let items = load_items(filters.items.as_deref().unwrap_or(&config.items_path))?;
            let filter_set = build_filter_set(&filters, &config)?;

            let kept = apply_comment_filters(&items, &filter_set)?;

            let sort = match sort {
                Some(name) => parse_sort(&name)?,
                None => config.sort,
            };
            let sorted = sort_items(&kept, sort);

            info!(
                loaded = items.len(),
                kept = sorted.len(),
                sort = sort.as_str(),
                "Filtered comments"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                feedshield::output::terminal::display_items(&sorted, items.len());
            }
        }

        Commands::Summary { filters, ids } => {
            let items = load_items(filters.items.as_deref().unwrap_or(&config.items_path))?;
            let filter_set = build_filter_set(&filters, &config)?;

            let kept = apply_comment_filters(&items, &filter_set)?;
            let selected = if ids.is_empty() {
                kept
            } else {
                let chosen = select_report_items(kept, &ids);
                if chosen.len() < ids.len() {
                    warn!(
                        requested = ids.len(),
                        found = chosen.len(),
                        "Some report ids were not found among the filtered comments"
                    );
                }
                chosen
            };

            let summary = compute_report_summary(selected);
            feedshield::output::terminal::display_report_summary(&summary);
        }
    }

    Ok(())
}

/// Load the scored items JSON array.
fn load_items(path: &Path) -> Result<Vec<ScoredItem<SocialMediaItem>>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items from {}", path.display()))?;
    let items: Vec<ScoredItem<SocialMediaItem>> = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse items in {}", path.display()))?;
    info!(count = items.len(), path = %path.display(), "Loaded scored items");
    Ok(items)
}

/// Start from the filter file (if any) and merge the command-line flags on top.
fn build_filter_set(args: &FilterArgs, config: &Config) -> Result<FilterSet> {
    let base = match args.filters.as_ref().or(config.filters_path.as_ref()) {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read filters from {}", path.display()))?;
            serde_json::from_str::<FilterSet>(&json)
                .with_context(|| format!("Failed to parse filters in {}", path.display()))?
        }
        None => FilterSet::default(),
    };

    let mut toxicity_range_filters = Vec::new();
    for range in &args.toxicity {
        toxicity_range_filters.push(parse_toxicity_range(range, args.include_unscored)?);
    }
    for name in &args.ranges {
        let Some(preset) = ToxicityPreset::from_name(name) else {
            anyhow::bail!("Unknown toxicity range {name:?}. Use low, medium, high or severe.");
        };
        toxicity_range_filters.push(preset.filter(args.include_unscored));
    }

    let regex_filters = args
        .include
        .iter()
        .map(RegexFilter::include)
        .chain(args.exclude.iter().map(RegexFilter::exclude))
        .collect();

    let date_filter = parse_date_filter(args.since.as_deref(), args.until.as_deref())?;

    let flags = FilterSet {
        toxicity_range_filters,
        regex_filters,
        date_filter,
        image_filter: args.images,
        verified_filter: args.verified,
    };

    Ok(base.merge(flags))
}

/// Parse "MIN-MAX" into a toxicity range.
fn parse_toxicity_range(range: &str, include_unscored: bool) -> Result<ToxicityRangeFilter> {
    let Some((min, max)) = range.split_once('-') else {
        anyhow::bail!("Toxicity range {range:?} must look like MIN-MAX, e.g. 0.8-1");
    };
    let min: f64 = min
        .trim()
        .parse()
        .with_context(|| format!("Invalid minimum in toxicity range {range:?}"))?;
    let max: f64 = max
        .trim()
        .parse()
        .with_context(|| format!("Invalid maximum in toxicity range {range:?}"))?;

    if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
        anyhow::bail!("Toxicity range {range:?} must satisfy 0 <= MIN <= MAX <= 1");
    }

    Ok(ToxicityRangeFilter::new(min, max, include_unscored))
}

/// Build a date window from `--since`/`--until`. A missing side is unbounded.
fn parse_date_filter(since: Option<&str>, until: Option<&str>) -> Result<Option<DateFilter>> {
    if since.is_none() && until.is_none() {
        return Ok(None);
    }
    let start = since.map(parse_timestamp_ms).transpose()?;
    let end = until.map(parse_timestamp_ms).transpose()?;
    Ok(Some(DateFilter::new(
        start.unwrap_or(i64::MIN),
        end.unwrap_or(i64::MAX),
    )))
}

/// Accept either RFC 3339 or epoch milliseconds.
fn parse_timestamp_ms(value: &str) -> Result<i64> {
    if let Ok(ms) = value.trim().parse::<i64>() {
        return Ok(ms);
    }
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(value.trim())
        .with_context(|| format!("Invalid timestamp {value:?} (use RFC 3339 or epoch ms)"))?
        .with_timezone(&Utc);
    Ok(parsed.timestamp_millis())
}

fn parse_sort(name: &str) -> Result<SortOption> {
    SortOption::from_name(name).with_context(|| {
        format!("Unknown sort {name:?}. Use priority, time or popularity.")
    })
}
