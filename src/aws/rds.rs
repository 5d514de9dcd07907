//! RDS-backed database capability

use super::{provider_error, AwsContext};
use crate::error::ProviderError;
use crate::pagination::Page;
use crate::providers::{DatabaseApi, DbClusterHandle, DbInstanceHandle};
use async_trait::async_trait;
use aws_sdk_rds::Client;
use tracing::debug;

/// RDS client implementing [`DatabaseApi`] for both instances and clusters.
pub struct RdsClient {
    client: Client,
}

impl RdsClient {
    /// Create an RDS client from a pre-loaded AWS context.
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.rds_client(),
        }
    }
}

#[async_trait]
impl DatabaseApi for RdsClient {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<DbInstanceHandle>, ProviderError> {
        let response = self
            .client
            .describe_db_instances()
            .set_marker(cursor)
            .send()
            .await
            .map_err(provider_error)?;

        let items = response
            .db_instances()
            .iter()
            .filter_map(|db| {
                db.db_instance_identifier().map(|id| DbInstanceHandle {
                    id: id.to_string(),
                    status: db.db_instance_status().map(str::to_string),
                })
            })
            .collect::<Vec<_>>();

        debug!(count = items.len(), "Listed DB instance page");
        Ok(Page {
            items,
            next: response.marker().map(str::to_string),
        })
    }

    async fn stop_instance(&self, id: &str) -> Result<(), ProviderError> {
        self.client
            .stop_db_instance()
            .db_instance_identifier(id)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(db_instance = %id, "Issued DB instance stop");
        Ok(())
    }

    async fn list_clusters(&self) -> Result<Vec<DbClusterHandle>, ProviderError> {
        let response = self
            .client
            .describe_db_clusters()
            .send()
            .await
            .map_err(provider_error)?;

        let clusters = response
            .db_clusters()
            .iter()
            .filter_map(|cluster| {
                cluster.db_cluster_identifier().map(|id| DbClusterHandle {
                    id: id.to_string(),
                    status: cluster.status().map(str::to_string),
                })
            })
            .collect::<Vec<_>>();

        debug!(count = clusters.len(), "Listed DB clusters");
        Ok(clusters)
    }

    async fn stop_cluster(&self, id: &str) -> Result<(), ProviderError> {
        self.client
            .stop_db_cluster()
            .db_cluster_identifier(id)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(db_cluster = %id, "Issued DB cluster stop");
        Ok(())
    }
}
