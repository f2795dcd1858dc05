// src/dashboard.rs

use reqwest::Client;
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::{AggregateConfig, Settings};
use crate::error::LoadError;
use crate::fetch::{check_source_url, fetch_csv};
use crate::parse::{parse, Table};
use crate::stats::{aggregate_with, ColumnDistribution};

/// Everything a front-end renders after a successful load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub table: Table,
    pub distributions: Vec<ColumnDistribution>,
}

impl Dashboard {
    /// Parse `text`, reject empty data, and aggregate.
    pub fn from_csv(text: &str, cfg: &AggregateConfig) -> Result<Self, LoadError> {
        let table = parse(text);
        if table.header().map_or(true, <[String]>::is_empty) {
            return Err(LoadError::EmptyInput);
        }
        let distributions = aggregate_with(&table, cfg);
        info!(
            rows = table.len(),
            charts = distributions.len(),
            "dashboard built"
        );
        Ok(Self {
            table,
            distributions,
        })
    }

    /// Check `url`, fetch it, and build the dashboard.
    ///
    /// Each call is independent; overlapping loads are not de-duplicated.
    #[instrument(level = "info", skip(client, settings))]
    pub async fn load(client: &Client, url: &str, settings: &Settings) -> Result<Self, LoadError> {
        let source = check_source_url(url)?;
        let text = fetch_csv(client, &source, &settings.fetch).await?;
        Self::from_csv(&text, &settings.aggregate)
    }

    /// Number of data rows, header excluded.
    pub fn responses(&self) -> usize {
        self.table.data_rows().len()
    }
}
