use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use framewatch_parser::{read_events, TimestampPolicy};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::normalize::{normalize, NormalizedTable};

/// Where the event CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Url(String),
    Path(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs; anything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A parsed and normalized event log, immutable once built.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub source: DataSource,
    pub table: NormalizedTable,
    /// blake3 hex digest of the raw CSV body.
    pub fingerprint: String,
    pub skipped_rows: usize,
    pub loaded_at: DateTime<Utc>,
}

pub fn prepare_dataset(
    source: DataSource,
    content: &str,
    policy: TimestampPolicy,
) -> Result<LoadedDataset> {
    let fingerprint = blake3::hash(content.as_bytes()).to_hex().to_string();
    let outcome = read_events(content, policy)?;
    let table = normalize(&outcome.events)?;

    info!(
        %source,
        rows = table.height(),
        skipped = outcome.skipped_rows(),
        fingerprint = %fingerprint,
        "dataset prepared"
    );

    Ok(LoadedDataset {
        source,
        table,
        fingerprint,
        skipped_rows: outcome.skipped_rows(),
        loaded_at: Utc::now(),
    })
}
