use std::path::Path;
use std::time::Duration;

use tracing::{info, instrument};

use crate::config::{DashboardConfig, SourceConfig};
use crate::dataset::{prepare_dataset, DataSource, LoadedDataset};
use crate::error::{DashboardError, Result};

/// Fetches the raw CSV body. One attempt, no retry.
#[instrument(skip_all, fields(source = %source.location))]
pub async fn fetch(source: &SourceConfig) -> Result<String> {
    let body = match source.data_source() {
        DataSource::Url(url) => {
            fetch_url(&url, Duration::from_secs(source.timeout_secs)).await?
        }
        DataSource::Path(path) => read_path(&path).await?,
    };

    if let Some(target) = &source.download_to {
        tokio::fs::write(target, body.as_bytes())
            .await
            .map_err(|err| {
                DashboardError::source_unavailable(
                    target.display().to_string(),
                    format!("failed to save download: {err}"),
                )
            })?;
        info!(path = %target.display(), bytes = body.len(), "saved source copy");
    }

    Ok(body)
}

async fn fetch_url(url: &str, timeout: Duration) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| DashboardError::source_unavailable(url, err))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| DashboardError::source_unavailable(url, err))?;

    let status = response.status();
    if !status.is_success() {
        return Err(DashboardError::source_unavailable(
            url,
            format!("HTTP status {status}"),
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|err| DashboardError::source_unavailable(url, err))?;
    info!(url, bytes = body.len(), "downloaded event log");
    Ok(body)
}

async fn read_path(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| DashboardError::source_unavailable(path.display().to_string(), err))
}

/// Fetches, parses and normalizes the configured source.
pub async fn load_dataset(config: &DashboardConfig) -> Result<LoadedDataset> {
    let body = fetch(&config.source).await?;
    prepare_dataset(config.source.data_source(), &body, config.timestamp_policy)
}
