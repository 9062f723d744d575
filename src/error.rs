use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an analysis run.
///
/// Load failures and degenerate statistics are both fatal: the tool is a
/// one-shot batch job and a half-counted corpus is worse than no output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Read {path} failed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse corpus {path} failed: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty utterance: a tag sequence needs at least one token")]
    EmptyUtterance,

    #[error("Corpus has no tokens; percentages are undefined")]
    EmptyCorpus,

    #[error(
        "Relative rate undefined (shared near/far = {shared_near}/{shared_far}, other near/far = {other_near}/{other_far})"
    )]
    UndefinedRate {
        shared_near: u64,
        shared_far: u64,
        other_near: u64,
        other_far: u64,
    },

    #[error("Gap must be at least 1 (got {0})")]
    InvalidGap(usize),

    #[error("Shared set is empty")]
    EmptySharedSet,

    #[error("Statistics failed: {0}")]
    Stats(String),

    #[error("Write {path} failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialize failed: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Plot failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
