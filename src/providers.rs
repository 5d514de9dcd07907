//! Provider capability interfaces
//!
//! One trait per provider capability group, holding the minimal verbs the
//! shutdown sweep needs. Drivers hold these as trait objects so tests can
//! substitute in-memory fakes for the AWS-backed implementations in
//! [`crate::aws`].

use crate::error::ProviderError;
use crate::pagination::Page;
use async_trait::async_trait;

/// A virtual machine instance as discovered by the compute listing API.
#[derive(Debug, Clone)]
pub struct InstanceHandle {
    pub id: String,
    /// Lifecycle state name as reported by the provider (e.g. "running",
    /// "stopped"). Informational only: the stop command is batched and
    /// unconditional, and must be safe against already-stopped instances.
    pub state: Option<String>,
}

/// A managed database instance.
#[derive(Debug, Clone)]
pub struct DbInstanceHandle {
    pub id: String,
    pub status: Option<String>,
}

/// A managed database cluster.
#[derive(Debug, Clone)]
pub struct DbClusterHandle {
    pub id: String,
    pub status: Option<String>,
}

/// An autoscaling group.
#[derive(Debug, Clone)]
pub struct GroupHandle {
    pub name: String,
    pub desired_capacity: i32,
}

/// Virtual machine instances (EC2).
#[async_trait]
pub trait ComputeApi: Send + Sync {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<InstanceHandle>, ProviderError>;

    /// Stop a batch of instances in one call.
    async fn stop_instances(&self, ids: &[String], force: bool) -> Result<(), ProviderError>;
}

/// Managed database instances and clusters (RDS).
#[async_trait]
pub trait DatabaseApi: Send + Sync {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<DbInstanceHandle>, ProviderError>;

    /// Stop one database instance. Rejected with an
    /// `InvalidParameterCombination` classification when the instance is not
    /// in a stoppable configuration (e.g. a read replica).
    async fn stop_instance(&self, id: &str) -> Result<(), ProviderError>;

    async fn list_clusters(&self) -> Result<Vec<DbClusterHandle>, ProviderError>;

    async fn stop_cluster(&self, id: &str) -> Result<(), ProviderError>;
}

/// Container orchestration services and tasks (ECS).
#[async_trait]
pub trait ContainerApi: Send + Sync {
    async fn list_clusters(&self, cursor: Option<String>) -> Result<Page<String>, ProviderError>;

    async fn list_services(
        &self,
        cluster: &str,
        cursor: Option<String>,
    ) -> Result<Page<String>, ProviderError>;

    async fn update_service_desired_count(
        &self,
        cluster: &str,
        service: &str,
        count: i32,
    ) -> Result<(), ProviderError>;

    /// List tasks currently running in a cluster (cluster-wide, not scoped
    /// to a service).
    async fn list_running_tasks(&self, cluster: &str) -> Result<Vec<String>, ProviderError>;

    async fn stop_task(&self, cluster: &str, task: &str) -> Result<(), ProviderError>;
}

/// Autoscaling groups.
#[async_trait]
pub trait AutoscalingApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<GroupHandle>, ProviderError>;

    async fn set_desired_capacity(&self, group: &str, capacity: i32)
        -> Result<(), ProviderError>;
}
