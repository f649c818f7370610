// Library error type.
//
// Missing scores, author names and flags are valid input, not errors. The
// only thing that can fail is compiling a user-supplied regex pattern.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    /// A regex filter's pattern could not be compiled.
    #[error("invalid regex filter pattern {pattern:?}: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T, E = FilterError> = std::result::Result<T, E>;
