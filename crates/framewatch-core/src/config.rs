use std::path::{Path, PathBuf};

use framewatch_parser::TimestampPolicy;
use serde::{Deserialize, Serialize};

use crate::dataset::DataSource;
use crate::error::{DashboardError, Result};
use crate::filter::FilterCriteria;

pub const DEFAULT_SOURCE_URL: &str =
    "https://drive.google.com/uc?export=download&id=1JezkyEFiGsRoqGj-9-vnY23no6Rn5vxZ";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_SOURCE: &str = "FRAMEWATCH_SOURCE";
pub const ENV_BIND: &str = "FRAMEWATCH_BIND";
pub const ENV_DOWNLOAD_TO: &str = "FRAMEWATCH_DOWNLOAD_TO";
pub const ENV_TIMESTAMP_POLICY: &str = "FRAMEWATCH_TIMESTAMP_POLICY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL or filesystem path of the event CSV.
    pub location: String,
    /// When set, a copy of the fetched CSV is written here.
    pub download_to: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE_URL.to_string(),
            download_to: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn data_source(&self) -> DataSource {
        DataSource::parse(&self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Settings for loading, filtering and serving the dashboard.
///
/// Resolution order: built-in defaults, then an optional TOML file, then `FRAMEWATCH_*`
/// environment variables. Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub filter: FilterCriteria,
    pub timestamp_policy: TimestampPolicy,
    pub server: ServerConfig,
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| DashboardError::Config(err.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            DashboardError::Config(format!("failed to read '{}': {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults or `path`, with process environment overrides applied and validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `FRAMEWATCH_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(location) = lookup(ENV_SOURCE) {
            self.source.location = location.trim().to_string();
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind.trim().to_string();
        }
        if let Some(path) = lookup(ENV_DOWNLOAD_TO) {
            self.source.download_to = Some(PathBuf::from(path.trim()));
        }
        if let Some(policy) = lookup(ENV_TIMESTAMP_POLICY) {
            self.timestamp_policy = TimestampPolicy::try_from(policy.as_str())
                .map_err(|err| DashboardError::Config(format!("{ENV_TIMESTAMP_POLICY}: {err}")))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.location.trim().is_empty() {
            return Err(DashboardError::Config("source.location must not be empty".into()));
        }
        if self.source.timeout_secs == 0 {
            return Err(DashboardError::Config(
                "source.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.server.bind.trim().is_empty() {
            return Err(DashboardError::Config("server.bind must not be empty".into()));
        }
        Ok(())
    }
}
