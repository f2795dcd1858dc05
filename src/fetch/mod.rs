// src/fetch/mod.rs

use reqwest::Client;
use std::path::Path;
use tokio::{fs, time::sleep};
use tracing::{debug, error, info, instrument, warn};

use crate::config::FetchConfig;
use crate::error::LoadError;

/// Checking user-supplied source URLs before anything goes on the wire.
pub mod urls {
    use super::*;
    use url::Url;

    /// Substrings that mark a URL as a likely published-sheet CSV export.
    static SHEET_HINTS: &[&str] = &["docs.google.com", "spreadsheets", "output=csv"];

    /// A syntactically valid absolute URL to load CSV from.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SourceUrl {
        url: Url,
        raw: String,
    }

    impl SourceUrl {
        pub fn url(&self) -> &Url {
            &self.url
        }

        pub fn as_str(&self) -> &str {
            &self.raw
        }

        /// False when nothing about the URL suggests a sheet exported as
        /// CSV. Loading still goes ahead; the caller only gets a warning.
        pub fn looks_like_sheet_export(&self) -> bool {
            SHEET_HINTS.iter().any(|h| self.raw.contains(h)) || self.raw.ends_with(".csv")
        }
    }

    /// Validate `input` as a CSV source URL.
    pub fn check_source_url(input: &str) -> Result<SourceUrl, LoadError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(LoadError::MissingUrl);
        }
        let url = Url::parse(raw).map_err(|source| LoadError::InvalidUrl {
            input: raw.to_string(),
            source,
        })?;
        let source = SourceUrl {
            url,
            raw: raw.to_string(),
        };
        if !source.looks_like_sheet_export() {
            warn!(
                url = %source.as_str(),
                "URL doesn't appear to be a Google Sheets CSV; make sure the sheet is published to the web as CSV"
            );
        }
        Ok(source)
    }
}

pub use urls::{check_source_url, SourceUrl};

/// Build the HTTP client used for every load.
pub fn build_client(cfg: &FetchConfig) -> Result<Client, LoadError> {
    Client::builder()
        .timeout(cfg.timeout())
        .user_agent(cfg.user_agent.clone())
        .build()
        .map_err(|e| LoadError::Config(format!("building HTTP client: {e}")))
}

async fn get_text_core(client: &Client, source: &SourceUrl) -> Result<String, LoadError> {
    debug!("Fetching text from {}", source.as_str());
    let transport = |e: reqwest::Error| LoadError::Transport {
        url: source.as_str().to_string(),
        source: e,
    };
    let resp = client
        .get(source.url().clone())
        .send()
        .await
        .map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: source.as_str().to_string(),
            status,
        });
    }
    resp.text().await.map_err(transport)
}

fn is_retryable(err: &LoadError) -> bool {
    match err {
        // a request that cannot be built will never succeed
        LoadError::Transport { source, .. } => !source.is_builder(),
        LoadError::Status { status, .. } => status.is_server_error(),
        _ => false,
    }
}

/// GET the CSV body behind `source`.
///
/// Non-2xx responses and transport failures become errors rather than text.
/// 5xx responses and transport errors, except requests that could not be
/// built, are retried `cfg.retries` times with exponential backoff.
#[instrument(level = "info", skip(client, cfg), fields(url = %source.as_str()))]
pub async fn fetch_csv(
    client: &Client,
    source: &SourceUrl,
    cfg: &FetchConfig,
) -> Result<String, LoadError> {
    let mut attempts = 0;
    loop {
        match get_text_core(client, source).await {
            Ok(text) => {
                info!(bytes = text.len(), "fetched csv");
                return Ok(text);
            }
            Err(e) if attempts < cfg.retries && is_retryable(&e) => {
                let delay = cfg.backoff(attempts);
                attempts += 1;
                warn!(attempt = attempts, delay_ms = delay.as_millis() as u64, error = %e, "Retrying");
                sleep(delay).await;
            }
            Err(e) => {
                error!(error = %e, attempts = attempts + 1, "fetch failed");
                return Err(e);
            }
        }
    }
}

/// Read CSV text from a local file instead of a URL.
pub async fn read_csv_file<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), bytes = text.len(), "read csv file");
    Ok(text)
}
