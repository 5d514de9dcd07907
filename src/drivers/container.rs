//! Container orchestration driver (ECS clusters, services, tasks)

use super::{join_capped, StageReport};
use crate::error::StopError;
use crate::pagination::collect_pages;
use crate::providers::ContainerApi;
use std::sync::Arc;
use tracing::{info, warn};

/// Scales every service in every cluster down to zero desired tasks, then
/// stops the tasks still running.
///
/// In the report, `discovered`/`stopped` count services; stop commands for
/// individual tasks only show up as failures when they fail.
pub struct ContainerDriver {
    api: Arc<dyn ContainerApi>,
    max_in_flight: Option<usize>,
}

impl ContainerDriver {
    pub fn new(api: Arc<dyn ContainerApi>, max_in_flight: Option<usize>) -> Self {
        Self { api, max_in_flight }
    }

    /// List every cluster across all pages.
    pub async fn discover(&self) -> Result<Vec<String>, StopError> {
        let clusters = collect_pages(|cursor| self.api.list_clusters(cursor)).await?;
        info!(count = clusters.len(), "Discovered container clusters");
        Ok(clusters)
    }

    /// Sweep all clusters concurrently; clusters are independent of each
    /// other, so one cluster's failure never blocks another's sweep.
    pub async fn shutdown(&self, clusters: &[String]) -> StageReport {
        let sweeps = clusters
            .iter()
            .map(|cluster| self.sweep_cluster(cluster))
            .collect();

        let mut report = StageReport::default();
        for partial in join_capped(sweeps, self.max_in_flight).await {
            report.merge(partial);
        }
        report
    }

    /// Scale every service of one cluster to zero and stop its running tasks.
    async fn sweep_cluster(&self, cluster: &str) -> StageReport {
        let services = match collect_pages(|cursor| self.api.list_services(cluster, cursor)).await
        {
            Ok(services) => services,
            Err(e) => {
                warn!(cluster = %cluster, error = %e, "Failed to list services");
                let mut report = StageReport::default();
                report.record_failure(cluster, e);
                return report;
            }
        };

        let mut report = StageReport {
            discovered: services.len(),
            ..Default::default()
        };

        let ops = services
            .iter()
            .map(|service| self.stop_service(cluster, service))
            .collect();

        for partial in join_capped(ops, self.max_in_flight).await {
            report.merge(partial);
        }
        report
    }

    /// Zero one service's desired count, then stop the cluster's running
    /// tasks.
    ///
    /// The task listing is cluster-scoped, not service-scoped: when a
    /// cluster has several services, each service sweep stops every running
    /// task in the cluster, so sibling services' tasks get overlapping stop
    /// commands. StopTask is idempotent, so the overlap is harmless.
    async fn stop_service(&self, cluster: &str, service: &str) -> StageReport {
        let mut report = StageReport::default();

        if let Err(e) = self
            .api
            .update_service_desired_count(cluster, service, 0)
            .await
        {
            warn!(cluster = %cluster, service = %service, error = %e, "Failed to zero service");
            report.record_failure(service, e);
            return report;
        }

        let tasks = match self.api.list_running_tasks(cluster).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(cluster = %cluster, service = %service, error = %e, "Failed to list tasks");
                report.record_failure(service, e);
                return report;
            }
        };

        let stops = tasks
            .iter()
            .map(|task| {
                let task = task.clone();
                async move {
                    let result = self.api.stop_task(cluster, &task).await;
                    (task, result)
                }
            })
            .collect();

        let mut task_failures = 0;
        for (task, result) in join_capped(stops, self.max_in_flight).await {
            if let Err(e) = result {
                warn!(cluster = %cluster, task = %task, error = %e, "Failed to stop task");
                report.record_failure(task, e);
                task_failures += 1;
            }
        }

        if task_failures == 0 {
            report.stopped = 1;
        }
        report
    }
}
