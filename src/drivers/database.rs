//! Managed database driver (RDS instances and clusters)

use super::{join_capped, StageReport};
use crate::error::StopError;
use crate::pagination::collect_pages;
use crate::providers::{DatabaseApi, DbClusterHandle, DbInstanceHandle};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Status a database instance or cluster must be in to accept a stop command.
const STOPPABLE_STATUS: &str = "available";

/// Discovers and stops managed database instances and clusters.
///
/// Both categories are filtered to `"available"` status at discovery:
/// issuing a stop against a database that is already stopped, stopping, or
/// in an error state is rejected by the provider, unlike the idempotent VM
/// and autoscaling commands.
pub struct DatabaseDriver {
    api: Arc<dyn DatabaseApi>,
    max_in_flight: Option<usize>,
}

impl DatabaseDriver {
    pub fn new(api: Arc<dyn DatabaseApi>, max_in_flight: Option<usize>) -> Self {
        Self { api, max_in_flight }
    }

    /// List database instances across all pages, keeping only stoppable ones.
    pub async fn discover_instances(&self) -> Result<Vec<DbInstanceHandle>, StopError> {
        let all = collect_pages(|cursor| self.api.list_instances(cursor)).await?;
        let eligible: Vec<_> = all
            .into_iter()
            .filter(|db| db.status.as_deref() == Some(STOPPABLE_STATUS))
            .collect();
        info!(count = eligible.len(), "Discovered stoppable DB instances");
        Ok(eligible)
    }

    /// Stop each instance concurrently.
    ///
    /// A rejection classified as `InvalidParameterCombination` means the
    /// instance cannot be stopped in its current configuration (e.g. a read
    /// replica); that is counted as suppressed, not failed.
    pub async fn shutdown_instances(&self, handles: &[DbInstanceHandle]) -> StageReport {
        let mut report = StageReport {
            discovered: handles.len(),
            ..Default::default()
        };

        let ops = handles
            .iter()
            .map(|db| {
                let id = db.id.clone();
                async move {
                    let result = self.api.stop_instance(&id).await;
                    (id, result)
                }
            })
            .collect();

        for (id, result) in join_capped(ops, self.max_in_flight).await {
            match result {
                Ok(()) => report.stopped += 1,
                Err(e) if e.is_benign_stop_rejection() => {
                    debug!(db_instance = %id, "Not in a stoppable configuration, skipping");
                    report.suppressed += 1;
                }
                Err(e) => {
                    warn!(db_instance = %id, error = %e, "Failed to stop DB instance");
                    report.record_failure(id, e);
                }
            }
        }

        report
    }

    /// List database clusters (single call), keeping only `"available"` ones.
    pub async fn discover_clusters(&self) -> Result<Vec<DbClusterHandle>, StopError> {
        let all = self.api.list_clusters().await?;
        let eligible: Vec<_> = all
            .into_iter()
            .filter(|c| c.status.as_deref() == Some(STOPPABLE_STATUS))
            .collect();
        info!(count = eligible.len(), "Discovered stoppable DB clusters");
        Ok(eligible)
    }

    /// Stop each cluster concurrently.
    pub async fn shutdown_clusters(&self, handles: &[DbClusterHandle]) -> StageReport {
        let mut report = StageReport {
            discovered: handles.len(),
            ..Default::default()
        };

        let ops = handles
            .iter()
            .map(|cluster| {
                let id = cluster.id.clone();
                async move {
                    let result = self.api.stop_cluster(&id).await;
                    (id, result)
                }
            })
            .collect();

        for (id, result) in join_capped(ops, self.max_in_flight).await {
            match result {
                Ok(()) => report.stopped += 1,
                Err(e) => {
                    warn!(db_cluster = %id, error = %e, "Failed to stop DB cluster");
                    report.record_failure(id, e);
                }
            }
        }

        report
    }
}
