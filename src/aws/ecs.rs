//! ECS-backed container orchestration capability

use super::{provider_error, AwsContext};
use crate::error::ProviderError;
use crate::pagination::Page;
use crate::providers::ContainerApi;
use async_trait::async_trait;
use aws_sdk_ecs::types::DesiredStatus;
use aws_sdk_ecs::Client;
use tracing::debug;

/// ECS client implementing [`ContainerApi`].
pub struct EcsClient {
    client: Client,
}

impl EcsClient {
    /// Create an ECS client from a pre-loaded AWS context.
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ecs_client(),
        }
    }
}

#[async_trait]
impl ContainerApi for EcsClient {
    async fn list_clusters(&self, cursor: Option<String>) -> Result<Page<String>, ProviderError> {
        let response = self
            .client
            .list_clusters()
            .set_next_token(cursor)
            .send()
            .await
            .map_err(provider_error)?;

        let items = response.cluster_arns().to_vec();
        debug!(count = items.len(), "Listed ECS cluster page");
        Ok(Page {
            items,
            next: response.next_token().map(str::to_string),
        })
    }

    async fn list_services(
        &self,
        cluster: &str,
        cursor: Option<String>,
    ) -> Result<Page<String>, ProviderError> {
        let response = self
            .client
            .list_services()
            .cluster(cluster)
            .set_next_token(cursor)
            .send()
            .await
            .map_err(provider_error)?;

        let items = response.service_arns().to_vec();
        debug!(cluster = %cluster, count = items.len(), "Listed ECS service page");
        Ok(Page {
            items,
            next: response.next_token().map(str::to_string),
        })
    }

    async fn update_service_desired_count(
        &self,
        cluster: &str,
        service: &str,
        count: i32,
    ) -> Result<(), ProviderError> {
        self.client
            .update_service()
            .cluster(cluster)
            .service(service)
            .desired_count(count)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(cluster = %cluster, service = %service, count, "Updated service desired count");
        Ok(())
    }

    async fn list_running_tasks(&self, cluster: &str) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .list_tasks()
            .cluster(cluster)
            .desired_status(DesiredStatus::Running)
            .send()
            .await
            .map_err(provider_error)?;

        let tasks = response.task_arns().to_vec();
        debug!(cluster = %cluster, count = tasks.len(), "Listed running tasks");
        Ok(tasks)
    }

    async fn stop_task(&self, cluster: &str, task: &str) -> Result<(), ProviderError> {
        self.client
            .stop_task()
            .cluster(cluster)
            .task(task)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(cluster = %cluster, task = %task, "Issued task stop");
        Ok(())
    }
}
