//! EC2-backed compute capability

use super::{provider_error, AwsContext};
use crate::error::ProviderError;
use crate::pagination::Page;
use crate::providers::{ComputeApi, InstanceHandle};
use async_trait::async_trait;
use aws_sdk_ec2::Client;
use tracing::debug;

/// EC2 client implementing [`ComputeApi`].
pub struct Ec2Client {
    client: Client,
}

impl Ec2Client {
    /// Create an EC2 client from a pre-loaded AWS context.
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}

#[async_trait]
impl ComputeApi for Ec2Client {
    async fn list_instances(
        &self,
        cursor: Option<String>,
    ) -> Result<Page<InstanceHandle>, ProviderError> {
        let response = self
            .client
            .describe_instances()
            .set_next_token(cursor)
            .send()
            .await
            .map_err(provider_error)?;

        // Instances come grouped into reservations; flatten them.
        let mut items = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                let Some(id) = instance.instance_id() else {
                    continue;
                };
                items.push(InstanceHandle {
                    id: id.to_string(),
                    state: instance
                        .state()
                        .and_then(|s| s.name())
                        .map(|n| n.as_str().to_string()),
                });
            }
        }

        debug!(count = items.len(), "Listed EC2 instance page");
        Ok(Page {
            items,
            next: response.next_token().map(str::to_string),
        })
    }

    async fn stop_instances(&self, ids: &[String], force: bool) -> Result<(), ProviderError> {
        self.client
            .stop_instances()
            .set_instance_ids(Some(ids.to_vec()))
            .force(force)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(count = ids.len(), force, "Issued batched instance stop");
        Ok(())
    }
}
