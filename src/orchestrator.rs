//! Shutdown orchestration
//!
//! Runs the five resource-category stages once, in a fixed order, and
//! aggregates per-resource outcomes into a [`StopReport`]. A stage's failure
//! is recorded and the remaining stages still run; the caller decides at the
//! end whether the run as a whole failed.

use crate::config::StopConfig;
use crate::drivers::{
    AutoscalingDriver, ComputeDriver, ContainerDriver, DatabaseDriver, StageReport,
};
use crate::providers::{AutoscalingApi, ComputeApi, ContainerApi, DatabaseApi};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregated outcome of one full shutdown sweep, one entry per stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StopReport {
    pub autoscaling_groups: StageReport,
    pub vm_instances: StageReport,
    pub db_clusters: StageReport,
    pub db_instances: StageReport,
    pub container_services: StageReport,
}

impl StopReport {
    pub fn has_failures(&self) -> bool {
        self.stages().iter().any(|s| s.has_failures())
    }

    pub fn failure_count(&self) -> usize {
        self.stages().iter().map(|s| s.failures.len()).sum()
    }

    pub fn stopped_count(&self) -> usize {
        self.stages().iter().map(|s| s.stopped).sum()
    }

    fn stages(&self) -> [&StageReport; 5] {
        [
            &self.autoscaling_groups,
            &self.vm_instances,
            &self.db_clusters,
            &self.db_instances,
            &self.container_services,
        ]
    }
}

/// Sequences the five drivers over one stateless run.
pub struct Orchestrator {
    autoscaling: AutoscalingDriver,
    compute: ComputeDriver,
    database: DatabaseDriver,
    container: ContainerDriver,
}

impl Orchestrator {
    pub fn new(
        autoscaling: Arc<dyn AutoscalingApi>,
        compute: Arc<dyn ComputeApi>,
        database: Arc<dyn DatabaseApi>,
        container: Arc<dyn ContainerApi>,
        config: &StopConfig,
    ) -> Self {
        let cap = config.max_in_flight;
        Self {
            autoscaling: AutoscalingDriver::new(autoscaling, cap),
            compute: ComputeDriver::new(compute),
            database: DatabaseDriver::new(database, cap),
            container: ContainerDriver::new(container, cap),
        }
    }

    /// Run all five stages and collect the report.
    ///
    /// Stage order is fixed for determinism; the categories are independent
    /// so the order carries no semantic weight.
    pub async fn run(&self) -> StopReport {
        let mut report = StopReport::default();

        info!("Stage 1/5: autoscaling groups");
        report.autoscaling_groups = match self.autoscaling.discover().await {
            Ok(groups) => self.autoscaling.shutdown(&groups).await,
            Err(e) => {
                warn!(error = %e, "Autoscaling discovery failed");
                StageReport::discovery_failed(e)
            }
        };

        info!("Stage 2/5: VM instances");
        report.vm_instances = match self.compute.discover().await {
            Ok(instances) => self.compute.shutdown(&instances).await,
            Err(e) => {
                warn!(error = %e, "VM discovery failed");
                StageReport::discovery_failed(e)
            }
        };

        info!("Stage 3/5: DB clusters");
        report.db_clusters = match self.database.discover_clusters().await {
            Ok(clusters) => self.database.shutdown_clusters(&clusters).await,
            Err(e) => {
                warn!(error = %e, "DB cluster discovery failed");
                StageReport::discovery_failed(e)
            }
        };

        info!("Stage 4/5: DB instances");
        report.db_instances = match self.database.discover_instances().await {
            Ok(instances) => self.database.shutdown_instances(&instances).await,
            Err(e) => {
                warn!(error = %e, "DB instance discovery failed");
                StageReport::discovery_failed(e)
            }
        };

        info!("Stage 5/5: container services");
        report.container_services = match self.container.discover().await {
            Ok(clusters) => self.container.shutdown(&clusters).await,
            Err(e) => {
                warn!(error = %e, "Container cluster discovery failed");
                StageReport::discovery_failed(e)
            }
        };

        info!(
            stopped = report.stopped_count(),
            failures = report.failure_count(),
            "Shutdown sweep complete"
        );
        report
    }
}

/// Build the AWS-backed orchestrator and run one sweep.
pub async fn run(config: &StopConfig) -> StopReport {
    let ctx = crate::aws::AwsContext::new(config.region.as_deref()).await;
    let orchestrator = Orchestrator::new(
        Arc::new(crate::aws::AutoscalingClient::from_context(&ctx)),
        Arc::new(crate::aws::Ec2Client::from_context(&ctx)),
        Arc::new(crate::aws::RdsClient::from_context(&ctx)),
        Arc::new(crate::aws::EcsClient::from_context(&ctx)),
        config,
    );
    orchestrator.run().await
}
