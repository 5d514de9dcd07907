//! Virtual machine instance driver (EC2)

use super::StageReport;
use crate::error::StopError;
use crate::pagination::collect_pages;
use crate::providers::{ComputeApi, InstanceHandle};
use std::sync::Arc;
use tracing::{info, warn};

/// Discovers VM instances and stops them with one batched force-stop call.
///
/// No eligibility filter is applied: the batched stop is idempotent and safe
/// against instances that are already stopped or stopping.
pub struct ComputeDriver {
    api: Arc<dyn ComputeApi>,
}

impl ComputeDriver {
    pub fn new(api: Arc<dyn ComputeApi>) -> Self {
        Self { api }
    }

    /// List every instance across all pages.
    pub async fn discover(&self) -> Result<Vec<InstanceHandle>, StopError> {
        let instances = collect_pages(|cursor| self.api.list_instances(cursor)).await?;
        info!(count = instances.len(), "Discovered VM instances");
        Ok(instances)
    }

    /// Force-stop all discovered instances in a single batched command.
    /// Skipped entirely when discovery returned nothing.
    pub async fn shutdown(&self, handles: &[InstanceHandle]) -> StageReport {
        let mut report = StageReport {
            discovered: handles.len(),
            ..Default::default()
        };

        if handles.is_empty() {
            info!("No VM instances to stop");
            return report;
        }

        let ids: Vec<String> = handles.iter().map(|h| h.id.clone()).collect();
        info!(count = ids.len(), "Force-stopping VM instances");

        match self.api.stop_instances(&ids, true).await {
            Ok(()) => report.stopped = ids.len(),
            Err(e) => {
                warn!(error = %e, "Batched VM stop failed");
                for id in ids {
                    report.record_failure(id, &e);
                }
            }
        }

        report
    }
}
