//! AWS-backed implementations of the provider capability traits
//!
//! - EC2: VM instance listing and batched force-stop
//! - RDS: database instance/cluster listing and stop
//! - ECS: cluster/service/task listing, service scale-down, task stop
//! - Auto Scaling: group listing and desired-capacity updates

pub mod autoscaling;
pub mod context;
pub mod ec2;
pub mod ecs;
pub mod rds;

pub use autoscaling::AutoscalingClient;
pub use context::AwsContext;
pub use ec2::Ec2Client;
pub use ecs::EcsClient;
pub use rds::RdsClient;

use crate::error::ProviderError;
use aws_sdk_ec2::error::ProvideErrorMetadata;

/// Map any AWS SDK operation error to a classified [`ProviderError`].
///
/// `SdkError` forwards `ProvideErrorMetadata` from the service error, so the
/// real error code is available here without downcasting per operation.
pub(crate) fn provider_error<E>(err: E) -> ProviderError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{err:?}"));
    ProviderError::classify(code.as_deref(), Some(&message))
}
