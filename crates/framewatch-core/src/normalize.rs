use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use framewatch_parser::schema::{DATETIME, ERROR_CODE, ERROR_DESCRIPTION, ERROR_TYPE, VIEW_ID};
use framewatch_parser::{RawEvent, REQUIRED_COLUMNS};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{DashboardError, Result};

pub const DATE: &str = "Date";
pub const HOUR: &str = "Hour";

/// Columns kept after normalization, in frame order.
pub const NORMALIZED_COLUMNS: [&str; 4] = [VIEW_ID, ERROR_DESCRIPTION, DATE, HOUR];

/// Days from 0001-01-01 to 1970-01-01; polars stores `Date` as days since the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Error and warning counts over the whole, unfiltered dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTotals {
    pub errors: u64,
    pub warnings: u64,
}

/// The event log after timestamp coercion, Date/Hour derivation and column pruning.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    frame: DataFrame,
    totals: EventTotals,
}

impl NormalizedTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn totals(&self) -> EventTotals {
        self.totals
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

/// Builds the raw event frame with `Datetime` typed as a microsecond datetime column.
/// Missing timestamps become nulls.
pub fn events_to_frame(events: &[RawEvent]) -> PolarsResult<DataFrame> {
    let datetime = Series::new(
        DATETIME.into(),
        events
            .iter()
            .map(|event| event.datetime.map(|dt| dt.and_utc().timestamp_micros()))
            .collect::<Vec<_>>(),
    )
    .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let view_ids: Vec<Option<i64>> = events.iter().map(|event| event.view_id).collect();
    let error_types: Vec<Option<&str>> = events
        .iter()
        .map(|event| event.error_type.as_deref())
        .collect();
    let error_codes: Vec<Option<&str>> = events
        .iter()
        .map(|event| event.error_code.as_deref())
        .collect();
    let descriptions: Vec<Option<&str>> = events
        .iter()
        .map(|event| event.error_description.as_deref())
        .collect();

    DataFrame::new(vec![
        datetime.into(),
        Series::new(VIEW_ID.into(), view_ids).into(),
        Series::new(ERROR_TYPE.into(), error_types).into(),
        Series::new(ERROR_CODE.into(), error_codes).into(),
        Series::new(ERROR_DESCRIPTION.into(), descriptions).into(),
    ])
}

#[instrument(skip_all, fields(rows = events.len()))]
pub fn normalize(events: &[RawEvent]) -> Result<NormalizedTable> {
    let raw = events_to_frame(events)?;
    normalize_frame(&raw)
}

/// Normalizes an already-built raw frame. `Datetime` must be a datetime column; null
/// timestamps yield null `Date` and `Hour`.
pub fn normalize_frame(raw: &DataFrame) -> Result<NormalizedTable> {
    let present = raw.get_column_names();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|name| !present.iter().any(|col| col.as_str() == *name))
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::Schema(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let datetime_column = raw.column(DATETIME)?;
    if !matches!(datetime_column.dtype(), DataType::Datetime(_, _)) {
        return Err(DashboardError::Parse(format!(
            "{DATETIME} column has dtype {}, expected a datetime",
            datetime_column.dtype()
        )));
    }
    let micros = datetime_column
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        .cast(&DataType::Int64)?;
    let micros = micros.i64()?;

    let len = raw.height();
    let mut dates: Vec<Option<i32>> = Vec::with_capacity(len);
    let mut hours: Vec<Option<i32>> = Vec::with_capacity(len);

    for value in micros.into_iter() {
        let Some(value) = value else {
            dates.push(None);
            hours.push(None);
            continue;
        };
        let stamp = DateTime::<Utc>::from_timestamp_micros(value)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| {
                DashboardError::Parse(format!("{DATETIME} value {value} is out of range"))
            })?;
        dates.push(Some(epoch_days(stamp)));
        hours.push(Some(stamp.hour() as i32));
    }

    let totals = count_totals(raw.column(ERROR_TYPE)?.str()?);

    let mut frame = raw.select([VIEW_ID, ERROR_DESCRIPTION])?;
    let date_series = Series::new(DATE.into(), dates).cast(&DataType::Date)?;
    let hour_series = Series::new(HOUR.into(), hours);
    let columns: [Column; 2] = [date_series.into(), hour_series.into()];
    frame.hstack_mut(&columns)?;
    let frame = frame.select(NORMALIZED_COLUMNS)?;

    debug!(
        rows = frame.height(),
        errors = totals.errors,
        warnings = totals.warnings,
        "normalized camera events"
    );

    Ok(NormalizedTable { frame, totals })
}

fn count_totals(error_types: &StringChunked) -> EventTotals {
    let mut totals = EventTotals::default();
    for value in error_types.into_iter().flatten() {
        match value {
            "Error" => totals.errors += 1,
            "Warning" => totals.warnings += 1,
            _ => {}
        }
    }
    totals
}

fn epoch_days(stamp: NaiveDateTime) -> i32 {
    stamp.date().num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub(crate) fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}
