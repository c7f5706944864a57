// crates/framewatch-core/src/error.rs

use framewatch_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Source {location} unavailable: {message}")]
    SourceUnavailable { location: String, message: String },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn source_unavailable(location: impl Into<String>, message: impl ToString) -> Self {
        DashboardError::SourceUnavailable {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

impl From<ParserError> for DashboardError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::MissingColumns { .. } => DashboardError::Schema(err.to_string()),
            other => DashboardError::Parse(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
