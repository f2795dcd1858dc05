// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a dashboard from loading.
///
/// The parser and aggregator never produce these: they accept any text. Only
/// the edges (URL checks, HTTP, files, config, the empty-data check) do.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("please enter a CSV URL")]
    MissingUrl,

    #[error("please enter a valid URL ({input}): {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("the CSV file appears to be empty")]
    EmptyInput,

    #[error("failed to fetch CSV from {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to fetch CSV from {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LoadError {
    /// Fetch failures: the user can retry with a corrected URL.
    pub fn is_fetch(&self) -> bool {
        matches!(self, LoadError::Status { .. } | LoadError::Transport { .. })
    }

    /// One-line hint suitable for showing to whoever supplied the source.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::MissingUrl => "Please enter a CSV URL.",
            LoadError::InvalidUrl { .. } => "Please enter a valid URL.",
            LoadError::EmptyInput => {
                "The CSV file appears to be empty. Check the source and try again."
            }
            LoadError::Status { .. } | LoadError::Transport { .. } => {
                "Failed to load CSV. Check the URL and ensure the sheet is published publicly."
            }
            LoadError::Io { .. } => "Failed to read the CSV file.",
            LoadError::Config(_) => "The configuration is invalid.",
        }
    }
}
