use std::sync::Arc;

use chrono::{DateTime, Utc};
use framewatch_core::source::load_dataset;
use framewatch_core::{DashboardConfig, LoadedDataset, Result};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

/// Shared server state: the resolved configuration and the cached, normalized dataset.
///
/// Handlers take a snapshot (`Arc` clone) and never hold the lock while computing.
#[derive(Clone)]
pub struct AppState {
    config: Arc<DashboardConfig>,
    dataset: Arc<RwLock<Arc<LoadedDataset>>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReloadSummary {
    pub fingerprint: String,
    pub changed: bool,
    pub rows: usize,
    pub skipped_rows: usize,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: LoadedDataset) -> Self {
        Self {
            config: Arc::new(config),
            dataset: Arc::new(RwLock::new(Arc::new(dataset))),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> Arc<LoadedDataset> {
        self.dataset.read().await.clone()
    }

    /// Re-fetches the source and swaps the cached dataset when its content changed.
    /// On failure the current dataset stays in service.
    pub async fn reload(&self) -> Result<ReloadSummary> {
        let fresh = load_dataset(&self.config).await?;

        let mut current = self.dataset.write().await;
        let changed = current.fingerprint != fresh.fingerprint;
        if changed {
            info!(
                previous = %current.fingerprint,
                fingerprint = %fresh.fingerprint,
                rows = fresh.table.height(),
                "dataset replaced"
            );
            *current = Arc::new(fresh);
        } else {
            info!(fingerprint = %current.fingerprint, "source unchanged; keeping cached dataset");
        }

        Ok(ReloadSummary {
            fingerprint: current.fingerprint.clone(),
            changed,
            rows: current.table.height(),
            skipped_rows: current.skipped_rows,
            loaded_at: current.loaded_at,
        })
    }
}
