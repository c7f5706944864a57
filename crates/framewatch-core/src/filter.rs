use std::collections::HashSet;

use chrono::NaiveDate;
use framewatch_parser::schema::{ERROR_DESCRIPTION, VIEW_ID};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::normalize::{date_from_epoch_days, NormalizedTable, DATE, HOUR};

pub const DEFAULT_CAMERAS: [i64; 4] = [3001, 3002, 3003, 3004];
pub const DEFAULT_PATTERN: &str = "video frame missing";

/// Which cameras are in scope and which failure mode to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub cameras: Vec<i64>,
    pub pattern: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            cameras: DEFAULT_CAMERAS.to_vec(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl FilterCriteria {
    pub fn new(cameras: impl IntoIterator<Item = i64>, pattern: impl Into<String>) -> Self {
        Self {
            cameras: cameras.into_iter().collect(),
            pattern: pattern.into(),
        }
    }

    /// Row predicate: camera in the allow-list and description containing the pattern,
    /// ignoring case. A missing description or camera never matches.
    ///
    /// Builds the camera set on every call; [`filter_events`] builds it once per table.
    pub fn matches(&self, view_id: Option<i64>, description: Option<&str>) -> bool {
        RowMatcher::new(self).matches(view_id, description)
    }
}

struct RowMatcher {
    cameras: HashSet<i64>,
    needle: String,
}

impl RowMatcher {
    fn new(criteria: &FilterCriteria) -> Self {
        Self {
            cameras: criteria.cameras.iter().copied().collect(),
            needle: criteria.pattern.to_lowercase(),
        }
    }

    fn matches(&self, view_id: Option<i64>, description: Option<&str>) -> bool {
        let (Some(view_id), Some(description)) = (view_id, description) else {
            return false;
        };
        self.cameras.contains(&view_id) && description.to_lowercase().contains(&self.needle)
    }
}

/// One row that survived the filter. `date` and `hour` are `None` when the timestamp was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredEvent {
    pub view_id: i64,
    pub error_description: String,
    pub date: Option<NaiveDate>,
    pub hour: Option<u32>,
}

/// Normalized rows restricted to the in-scope cameras and failure mode.
#[derive(Debug, Clone)]
pub struct FilteredEvents {
    frame: DataFrame,
}

impl FilteredEvents {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn to_rows(&self) -> Result<Vec<FilteredEvent>> {
        let view_ids = self.frame.column(VIEW_ID)?.i64()?;
        let descriptions = self.frame.column(ERROR_DESCRIPTION)?.str()?;
        let days = self.frame.column(DATE)?.cast(&DataType::Int32)?;
        let days = days.i32()?;
        let hours = self.frame.column(HOUR)?.i32()?;

        let rows = (0..self.frame.height())
            .filter_map(|idx| {
                Some(FilteredEvent {
                    view_id: view_ids.get(idx)?,
                    error_description: descriptions.get(idx)?.to_string(),
                    date: days.get(idx).and_then(date_from_epoch_days),
                    hour: hours.get(idx).and_then(|hour| u32::try_from(hour).ok()),
                })
            })
            .collect();

        Ok(rows)
    }
}

/// Keeps the rows of `table` that satisfy [`FilterCriteria::matches`], preserving order.
pub fn filter_events(table: &NormalizedTable, criteria: &FilterCriteria) -> Result<FilteredEvents> {
    let frame = table.frame();
    let view_ids = frame.column(VIEW_ID)?.i64()?;
    let descriptions = frame.column(ERROR_DESCRIPTION)?.str()?;
    let matcher = RowMatcher::new(criteria);

    let mask: BooleanChunked = view_ids
        .into_iter()
        .zip(descriptions.into_iter())
        .map(|(view_id, description)| matcher.matches(view_id, description))
        .collect();

    let filtered = frame.filter(&mask)?;

    debug!(
        input_rows = frame.height(),
        matched_rows = filtered.height(),
        cameras = ?criteria.cameras,
        pattern = %criteria.pattern,
        "filtered camera events"
    );

    Ok(FilteredEvents { frame: filtered })
}
