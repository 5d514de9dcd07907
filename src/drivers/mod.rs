//! Resource drivers
//!
//! One driver per resource category. Each driver knows how to discover its
//! resources (via [`crate::pagination`] where the listing API paginates),
//! filter them to shutdown-eligible ones where the category requires it, and
//! issue the provider-specific stop/scale-down commands concurrently.

pub mod autoscaling;
pub mod compute;
pub mod container;
pub mod database;

pub use autoscaling::AutoscalingDriver;
pub use compute::ComputeDriver;
pub use container::ContainerDriver;
pub use database::DatabaseDriver;

use crate::error::StopError;
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::future::Future;

/// One failed shutdown command.
#[derive(Debug, Clone, Serialize)]
pub struct StageFailure {
    pub resource_id: String,
    pub error: String,
}

/// Outcome summary for one orchestrator stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageReport {
    /// Resources found by discovery (after eligibility filtering).
    pub discovered: usize,
    /// Stop/scale-down commands that succeeded.
    pub stopped: usize,
    /// Benign rejections treated as success (e.g. RDS replicas).
    pub suppressed: usize,
    /// Non-benign failures. The stage keeps going past these.
    pub failures: Vec<StageFailure>,
}

impl StageReport {
    /// A stage whose discovery step itself failed.
    pub fn discovery_failed(err: StopError) -> Self {
        Self {
            failures: vec![StageFailure {
                resource_id: "(discovery)".to_string(),
                error: err.to_string(),
            }],
            ..Default::default()
        }
    }

    pub fn record_failure(&mut self, resource_id: impl Into<String>, error: impl ToString) {
        self.failures.push(StageFailure {
            resource_id: resource_id.into(),
            error: error.to_string(),
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Fold another report into this one (used by nested fan-outs).
    pub fn merge(&mut self, other: StageReport) {
        self.discovered += other.discovered;
        self.stopped += other.stopped;
        self.suppressed += other.suppressed;
        self.failures.extend(other.failures);
    }
}

/// Await a batch of independent operations, optionally capping how many are
/// in flight at once.
///
/// With no cap every operation is launched immediately (the provider sees
/// the full fan-out width); a cap trades total wall time for staying under
/// provider API rate limits. Completion order is not meaningful either way.
pub(crate) async fn join_capped<F, T>(futures: Vec<F>, max_in_flight: Option<usize>) -> Vec<T>
where
    F: Future<Output = T>,
{
    match max_in_flight {
        Some(cap) if cap > 0 => stream::iter(futures).buffer_unordered(cap).collect().await,
        _ => join_all(futures).await,
    }
}
