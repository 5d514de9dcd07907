//! In-memory fakes of the provider capability traits.
//!
//! Each fake serves pre-seeded data and records every call it receives, so
//! tests can assert both outcomes and the exact command pattern issued.

use async_trait::async_trait;
use autostop::error::ProviderError;
use autostop::pagination::Page;
use autostop::providers::{
    AutoscalingApi, ComputeApi, ContainerApi, DatabaseApi, DbClusterHandle, DbInstanceHandle,
    GroupHandle, InstanceHandle,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Shared call log. Entries are formatted like `stop_instance(db-1)`.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
}

impl CallLog {
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_matching(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn contains(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }
}

fn throttled() -> ProviderError {
    ProviderError::classify(Some("Throttling"), Some("rate exceeded"))
}

// ---------------------------------------------------------------------------
// Compute

#[derive(Default)]
pub struct FakeCompute {
    pub log: CallLog,
    pages: Mutex<VecDeque<Page<InstanceHandle>>>,
    fail_stop: Mutex<bool>,
}

impl FakeCompute {
    pub fn with_pages(pages: Vec<Page<InstanceHandle>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::with_pages(vec![Page::last(vec![])])
    }

    pub fn fail_stop(self) -> Self {
        *self.fail_stop.lock().unwrap() = true;
        self
    }
}

pub fn instance(id: &str, state: &str) -> InstanceHandle {
    InstanceHandle {
        id: id.to_string(),
        state: Some(state.to_string()),
    }
}

#[async_trait]
impl ComputeApi for FakeCompute {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<InstanceHandle>, ProviderError> {
        self.log
            .record(format!("list_instances({})", cursor.as_deref().unwrap_or("-")));
        Ok(self
            .pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Page::last(vec![])))
    }

    async fn stop_instances(&self, ids: &[String], force: bool) -> Result<(), ProviderError> {
        self.log
            .record(format!("stop_instances({}, force={force})", ids.join(",")));
        if *self.fail_stop.lock().unwrap() {
            return Err(throttled());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Database

#[derive(Default)]
pub struct FakeDatabase {
    pub log: CallLog,
    instance_pages: Mutex<VecDeque<Page<DbInstanceHandle>>>,
    clusters: Vec<DbClusterHandle>,
    /// Per-id error injected into `stop_instance`.
    stop_instance_errors: HashMap<String, ProviderError>,
    fail_list_clusters: bool,
}

impl FakeDatabase {
    pub fn with_instance_pages(pages: Vec<Page<DbInstanceHandle>>) -> Self {
        Self {
            instance_pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn with_clusters(mut self, clusters: Vec<DbClusterHandle>) -> Self {
        self.clusters = clusters;
        self
    }

    pub fn with_stop_instance_error(mut self, id: &str, error: ProviderError) -> Self {
        self.stop_instance_errors.insert(id.to_string(), error);
        self
    }

    pub fn failing_cluster_list(mut self) -> Self {
        self.fail_list_clusters = true;
        self
    }
}

pub fn db_instance(id: &str, status: &str) -> DbInstanceHandle {
    DbInstanceHandle {
        id: id.to_string(),
        status: Some(status.to_string()),
    }
}

pub fn db_cluster(id: &str, status: &str) -> DbClusterHandle {
    DbClusterHandle {
        id: id.to_string(),
        status: Some(status.to_string()),
    }
}

#[async_trait]
impl DatabaseApi for FakeDatabase {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<DbInstanceHandle>, ProviderError> {
        self.log.record(format!(
            "list_db_instances({})",
            cursor.as_deref().unwrap_or("-")
        ));
        Ok(self
            .instance_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Page::last(vec![])))
    }

    async fn stop_instance(&self, id: &str) -> Result<(), ProviderError> {
        self.log.record(format!("stop_db_instance({id})"));
        match self.stop_instance_errors.get(id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn list_clusters(&self) -> Result<Vec<DbClusterHandle>, ProviderError> {
        self.log.record("list_db_clusters");
        if self.fail_list_clusters {
            return Err(throttled());
        }
        Ok(self.clusters.clone())
    }

    async fn stop_cluster(&self, id: &str) -> Result<(), ProviderError> {
        self.log.record(format!("stop_db_cluster({id})"));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Container

#[derive(Default)]
pub struct FakeContainer {
    pub log: CallLog,
    clusters: Vec<String>,
    services: HashMap<String, Vec<String>>,
    running_tasks: HashMap<String, Vec<String>>,
}

impl FakeContainer {
    pub fn new(clusters: &[&str]) -> Self {
        Self {
            clusters: clusters.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_services(mut self, cluster: &str, services: &[&str]) -> Self {
        self.services.insert(
            cluster.to_string(),
            services.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_running_tasks(mut self, cluster: &str, tasks: &[&str]) -> Self {
        self.running_tasks.insert(
            cluster.to_string(),
            tasks.iter().map(|t| t.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl ContainerApi for FakeContainer {
    async fn list_clusters(&self, cursor: Option<String>) -> Result<Page<String>, ProviderError> {
        self.log.record(format!(
            "list_clusters({})",
            cursor.as_deref().unwrap_or("-")
        ));
        Ok(Page::last(self.clusters.clone()))
    }

    async fn list_services(
        &self,
        cluster: &str,
        cursor: Option<String>,
    ) -> Result<Page<String>, ProviderError> {
        self.log.record(format!(
            "list_services({cluster}, {})",
            cursor.as_deref().unwrap_or("-")
        ));
        Ok(Page::last(
            self.services.get(cluster).cloned().unwrap_or_default(),
        ))
    }

    async fn update_service_desired_count(
        &self,
        cluster: &str,
        service: &str,
        count: i32,
    ) -> Result<(), ProviderError> {
        self.log
            .record(format!("update_service({cluster}, {service}, {count})"));
        Ok(())
    }

    async fn list_running_tasks(&self, cluster: &str) -> Result<Vec<String>, ProviderError> {
        self.log.record(format!("list_running_tasks({cluster})"));
        Ok(self.running_tasks.get(cluster).cloned().unwrap_or_default())
    }

    async fn stop_task(&self, cluster: &str, task: &str) -> Result<(), ProviderError> {
        self.log.record(format!("stop_task({cluster}, {task})"));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Autoscaling

#[derive(Default)]
pub struct FakeAutoscaling {
    pub log: CallLog,
    groups: Vec<GroupHandle>,
    fail_list: bool,
}

impl FakeAutoscaling {
    pub fn with_groups(groups: Vec<GroupHandle>) -> Self {
        Self {
            groups,
            ..Default::default()
        }
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }
}

pub fn group(name: &str, desired_capacity: i32) -> GroupHandle {
    GroupHandle {
        name: name.to_string(),
        desired_capacity,
    }
}

#[async_trait]
impl AutoscalingApi for FakeAutoscaling {
    async fn list_groups(&self) -> Result<Vec<GroupHandle>, ProviderError> {
        self.log.record("list_groups");
        if self.fail_list {
            return Err(ProviderError::classify(
                Some("AccessDenied"),
                Some("not allowed"),
            ));
        }
        Ok(self.groups.clone())
    }

    async fn set_desired_capacity(&self, group: &str, capacity: i32) -> Result<(), ProviderError> {
        self.log
            .record(format!("set_desired_capacity({group}, {capacity})"));
        Ok(())
    }
}
