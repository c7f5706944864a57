use framewatch_parser::RawEvent;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::aggregate::{
    by_camera, by_camera_and_date, by_hour_and_camera, CameraCount, CameraDateCount,
    HourCameraCount,
};
use crate::error::Result;
use crate::filter::{filter_events, FilterCriteria};
use crate::normalize::{normalize, NormalizedTable};

/// The five values handed to the renderer, plus the criteria that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub total_error: Vec<CameraCount>,
    pub camera_day_downtime: Vec<CameraDateCount>,
    pub hourly_errors: Vec<HourCameraCount>,
    pub total_error_count: u64,
    pub total_warning: u64,
    pub criteria: FilterCriteria,
}

impl DashboardData {
    /// Number of events that passed the filter.
    pub fn matched_events(&self) -> u64 {
        self.total_error.iter().map(|row| row.count).sum()
    }
}

#[instrument(skip_all, fields(rows = table.height()))]
pub fn build_dashboard(table: &NormalizedTable, criteria: &FilterCriteria) -> Result<DashboardData> {
    let filtered = filter_events(table, criteria)?;
    let totals = table.totals();

    let data = DashboardData {
        total_error: by_camera(&filtered)?,
        camera_day_downtime: by_camera_and_date(&filtered)?,
        hourly_errors: by_hour_and_camera(&filtered)?,
        total_error_count: totals.errors,
        total_warning: totals.warnings,
        criteria: criteria.clone(),
    };

    debug!(
        matched = filtered.height(),
        cameras = data.total_error.len(),
        camera_days = data.camera_day_downtime.len(),
        hour_buckets = data.hourly_errors.len(),
        "built dashboard aggregates"
    );

    Ok(data)
}

/// Normalizes `events` and builds the dashboard in one pass.
pub fn run_pipeline(events: &[RawEvent], criteria: &FilterCriteria) -> Result<DashboardData> {
    let table = normalize(events)?;
    build_dashboard(&table, criteria)
}
