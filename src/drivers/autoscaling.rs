//! Autoscaling group driver

use super::{join_capped, StageReport};
use crate::error::StopError;
use crate::providers::{AutoscalingApi, GroupHandle};
use std::sync::Arc;
use tracing::{info, warn};

/// Sets the desired capacity of every autoscaling group to zero.
///
/// No eligibility filter: re-zeroing a group that is already at zero is a
/// valid no-op, so every group is targeted unconditionally.
pub struct AutoscalingDriver {
    api: Arc<dyn AutoscalingApi>,
    max_in_flight: Option<usize>,
}

impl AutoscalingDriver {
    pub fn new(api: Arc<dyn AutoscalingApi>, max_in_flight: Option<usize>) -> Self {
        Self { api, max_in_flight }
    }

    /// List all groups (single call; the listing is not paginated here).
    pub async fn discover(&self) -> Result<Vec<GroupHandle>, StopError> {
        let groups = self.api.list_groups().await?;
        info!(count = groups.len(), "Discovered autoscaling groups");
        Ok(groups)
    }

    /// Zero every group's desired capacity concurrently.
    pub async fn shutdown(&self, handles: &[GroupHandle]) -> StageReport {
        let mut report = StageReport {
            discovered: handles.len(),
            ..Default::default()
        };

        let ops = handles
            .iter()
            .map(|group| {
                let name = group.name.clone();
                async move {
                    let result = self.api.set_desired_capacity(&name, 0).await;
                    (name, result)
                }
            })
            .collect();

        for (name, result) in join_capped(ops, self.max_in_flight).await {
            match result {
                Ok(()) => report.stopped += 1,
                Err(e) => {
                    warn!(group = %name, error = %e, "Failed to zero autoscaling group");
                    report.record_failure(name, e);
                }
            }
        }

        report
    }
}
