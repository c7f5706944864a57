pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod normalize;
#[cfg(feature = "runtime")]
pub mod source;

pub use aggregate::{CameraCount, CameraDateCount, HourCameraCount};
pub use config::DashboardConfig;
pub use dashboard::{build_dashboard, run_pipeline, DashboardData};
pub use dataset::{prepare_dataset, DataSource, LoadedDataset};
pub use error::{DashboardError, Result};
pub use filter::{filter_events, FilterCriteria, FilteredEvents};
pub use normalize::{normalize, EventTotals, NormalizedTable};
