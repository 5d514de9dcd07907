//! Auto Scaling-backed autoscaling capability

use super::{provider_error, AwsContext};
use crate::error::ProviderError;
use crate::providers::{AutoscalingApi, GroupHandle};
use async_trait::async_trait;
use aws_sdk_autoscaling::Client;
use tracing::debug;

/// Auto Scaling client implementing [`AutoscalingApi`].
pub struct AutoscalingClient {
    client: Client,
}

impl AutoscalingClient {
    /// Create an Auto Scaling client from a pre-loaded AWS context.
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.autoscaling_client(),
        }
    }
}

#[async_trait]
impl AutoscalingApi for AutoscalingClient {
    async fn list_groups(&self) -> Result<Vec<GroupHandle>, ProviderError> {
        let response = self
            .client
            .describe_auto_scaling_groups()
            .send()
            .await
            .map_err(provider_error)?;

        let groups = response
            .auto_scaling_groups()
            .iter()
            .filter_map(|group| {
                group.auto_scaling_group_name().map(|name| GroupHandle {
                    name: name.to_string(),
                    desired_capacity: group.desired_capacity().unwrap_or_default(),
                })
            })
            .collect::<Vec<_>>();

        debug!(count = groups.len(), "Listed autoscaling groups");
        Ok(groups)
    }

    async fn set_desired_capacity(
        &self,
        group: &str,
        capacity: i32,
    ) -> Result<(), ProviderError> {
        self.client
            .set_desired_capacity()
            .auto_scaling_group_name(group)
            .desired_capacity(capacity)
            .send()
            .await
            .map_err(provider_error)?;

        debug!(group = %group, capacity, "Set desired capacity");
        Ok(())
    }
}
