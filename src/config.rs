use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::sort::SortOption;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Command-line flags take
/// precedence over everything here.
pub struct Config {
    /// JSON array of scored items (FEEDSHIELD_ITEMS_PATH, default ./items.json)
    pub items_path: PathBuf,
    /// Optional JSON filter set applied before any command-line filters
    pub filters_path: Option<PathBuf>,
    /// Default ordering for the `filter` command
    pub sort: SortOption,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default, so this only fails on a value that is set
    /// but not understood.
    pub fn load() -> Result<Self> {
        let sort = match env::var("FEEDSHIELD_SORT") {
            Ok(name) => match SortOption::from_name(&name) {
                Some(option) => option,
                None => anyhow::bail!(
                    "FEEDSHIELD_SORT must be one of priority, time, popularity (got {name:?})"
                ),
            },
            Err(_) => SortOption::default(),
        };

        Ok(Self {
            items_path: env::var("FEEDSHIELD_ITEMS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./items.json")),
            filters_path: env::var("FEEDSHIELD_FILTERS_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            sort,
        })
    }
}
