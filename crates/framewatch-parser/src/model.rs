use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the camera event log.
///
/// `datetime` is `None` when the cell was blank. Text fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub datetime: Option<NaiveDateTime>,
    pub view_id: Option<i64>,
    pub error_type: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
}

/// What to do with a row whose `Datetime` cannot be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// Fail the whole load on the first bad value.
    #[default]
    Abort,
    /// Drop the row and record it in [`IngestOutcome::skipped`].
    Skip,
}

impl TimestampPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampPolicy::Abort => "abort",
            TimestampPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for TimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TimestampPolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(TimestampPolicy::Abort),
            "skip" => Ok(TimestampPolicy::Skip),
            other => Err(format!("unknown timestamp policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub events: Vec<RawEvent>,
    pub skipped: Vec<SkippedRow>,
}

impl IngestOutcome {
    pub fn skipped_rows(&self) -> usize {
        self.skipped.len()
    }
}
