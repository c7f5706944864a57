//! Group-and-count reductions over the filtered events.
//!
//! Each reduction emits one row per key with at least one member, ordered by ascending key
//! tuple. Absent key combinations are not zero-filled. Rows with a null key (a missing
//! timestamp has no Date or Hour) are left out of that reduction.

use chrono::NaiveDate;
use framewatch_parser::schema::VIEW_ID;
use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::filter::FilteredEvents;
use crate::normalize::{date_from_epoch_days, DATE, HOUR};

pub const COUNT: &str = "Count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CameraCount {
    #[serde(rename = "ViewID")]
    pub view_id: i64,
    #[serde(rename = "ErrorCount")]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CameraDateCount {
    #[serde(rename = "ViewID")]
    pub view_id: i64,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "DowntimeCount")]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HourCameraCount {
    #[serde(rename = "Hour")]
    pub hour: u32,
    #[serde(rename = "ViewID")]
    pub view_id: i64,
    #[serde(rename = "ErrorCount")]
    pub count: u64,
}

/// Counts rows per `keys`, sorted by the keys in the order given.
fn count_by(events: &FilteredEvents, keys: &[&str]) -> PolarsResult<DataFrame> {
    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();

    let mut rows = events.frame().clone().lazy();
    for key in &key_exprs {
        rows = rows.filter(key.clone().is_not_null());
    }

    rows.group_by(key_exprs.clone())
        .agg([len().alias(COUNT)])
        .with_column(col(COUNT).cast(DataType::UInt64))
        .sort_by_exprs(key_exprs, SortMultipleOptions::default())
        .collect()
}

pub fn by_camera(events: &FilteredEvents) -> Result<Vec<CameraCount>> {
    let counted = count_by(events, &[VIEW_ID])?;
    let view_ids = counted.column(VIEW_ID)?.i64()?;
    let counts = counted.column(COUNT)?.u64()?;

    let rows = view_ids
        .into_iter()
        .zip(counts.into_iter())
        .filter_map(|(view_id, count)| {
            Some(CameraCount {
                view_id: view_id?,
                count: count?,
            })
        })
        .collect();

    Ok(rows)
}

pub fn by_camera_and_date(events: &FilteredEvents) -> Result<Vec<CameraDateCount>> {
    let counted = count_by(events, &[VIEW_ID, DATE])?;
    let view_ids = counted.column(VIEW_ID)?.i64()?;
    let days = counted.column(DATE)?.cast(&DataType::Int32)?;
    let days = days.i32()?;
    let counts = counted.column(COUNT)?.u64()?;

    let rows = (0..counted.height())
        .filter_map(|idx| {
            Some(CameraDateCount {
                view_id: view_ids.get(idx)?,
                date: date_from_epoch_days(days.get(idx)?)?,
                count: counts.get(idx)?,
            })
        })
        .collect();

    Ok(rows)
}

pub fn by_hour_and_camera(events: &FilteredEvents) -> Result<Vec<HourCameraCount>> {
    let counted = count_by(events, &[HOUR, VIEW_ID])?;
    let hours = counted.column(HOUR)?.i32()?;
    let view_ids = counted.column(VIEW_ID)?.i64()?;
    let counts = counted.column(COUNT)?.u64()?;

    let rows = (0..counted.height())
        .filter_map(|idx| {
            Some(HourCameraCount {
                hour: u32::try_from(hours.get(idx)?).ok()?,
                view_id: view_ids.get(idx)?,
                count: counts.get(idx)?,
            })
        })
        .collect();

    Ok(rows)
}
