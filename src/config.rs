// src/config.rs

use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::error::LoadError;

/// Heuristics deciding which columns count as multiple-choice questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateConfig {
    /// Leading columns never classified (a form export puts its submission
    /// timestamp in column 0).
    pub identifier_columns: usize,
    /// Fewest distinct non-empty answers a categorical column may have.
    pub min_distinct: usize,
    /// Most distinct non-empty answers a categorical column may have.
    pub max_distinct: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            identifier_columns: 1,
            min_distinct: 2,
            max_distinct: 10,
        }
    }
}

impl AggregateConfig {
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.min_distinct == 0 {
            return Err(LoadError::Config("min_distinct must be at least 1".into()));
        }
        if self.min_distinct > self.max_distinct {
            return Err(LoadError::Config(format!(
                "min_distinct ({}) exceeds max_distinct ({})",
                self.min_distinct, self.max_distinct
            )));
        }
        Ok(())
    }

    /// Whether `distinct` non-empty values fall inside the categorical band.
    pub fn is_categorical(&self, distinct: usize) -> bool {
        (self.min_distinct..=self.max_distinct).contains(&distinct)
    }
}

/// HTTP behaviour of the source loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Extra attempts after a transport error or 5xx response.
    pub retries: u32,
    /// Delay before the first retry; doubles on each further attempt.
    pub backoff_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("sheetstats/", env!("CARGO_PKG_VERSION")).to_string(),
            retries: 0,
            backoff_ms: 500,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_ms.saturating_mul(2u64.saturating_pow(attempt)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub aggregate: AggregateConfig,
    pub fetch: FetchConfig,
}

impl Settings {
    pub fn from_yaml_str(text: &str) -> Result<Self, LoadError> {
        let settings: Settings =
            serde_yaml::from_str(text).map_err(|e| LoadError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        self.aggregate.validate()?;
        if self.fetch.timeout_secs == 0 {
            return Err(LoadError::Config("fetch.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
