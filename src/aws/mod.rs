//! AWS tag store implementations
//!
//! This module provides the AWS-backed sides of the reconciler: typed
//! lookups and `RemoteTagStore` implementations for the two resource
//! families tagsync manages.
//!
//! ## Module Organization
//!
//! - `vpc`: VPC lookup and the EC2 tagging API store (ID-addressed)
//! - `lag`: Direct Connect LAG lookup and tagging store (ARN-addressed)
//! - `types`: typed resource summaries and SDK tag conversions
//!
//! ## Design Philosophy
//!
//! Direct AWS SDK calls, no extra abstraction layer on top of the SDK
//! clients. The provider-agnostic seam is `RemoteTagStore` in `src/store.rs`;
//! everything below it is intentionally AWS-specific. Service error codes are
//! inspected once, here, and mapped onto the crate's error taxonomy so the
//! retry policy and the reconcile driver never see raw SDK errors.

mod lag;
mod types;
mod vpc;

pub use lag::{find_lag_by_id, LagTagStore};
pub use types::{Lag, Vpc};
pub use vpc::{find_vpc_by_id, VpcTagStore};

use crate::config::Config;
use crate::error::{Result, TagsyncError};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_ec2::error::ProvideErrorMetadata;

/// Load the shared SDK configuration from the tagsync config
///
/// Region comes from the `[aws]` section; credentials resolve through the
/// SDK's default provider chain (environment, profile, instance metadata).
pub async fn load_sdk_config(config: &Config) -> Result<SdkConfig> {
    let region = config.aws_region()?.to_string();
    let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region));
    if let Some(profile) = config.aws.as_ref().and_then(|a| a.profile.as_deref()) {
        loader = loader.profile_name(profile);
    }
    Ok(loader.load().await)
}

/// Map an AWS service error onto the crate taxonomy
///
/// Authorization codes become fatal `Permission` errors; everything else
/// (throttling, timeouts, 5xx, unmodeled errors) becomes a retryable
/// `Transport` error carrying the original as source.
pub(crate) fn map_service_error<E>(service: &'static str, operation: &str, err: E) -> TagsyncError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let code = err.code().unwrap_or_default();
    if code.contains("Unauthorized") || code.contains("AccessDenied") {
        return TagsyncError::Permission {
            service: service.to_string(),
            message: format!("{} failed: {}", operation, err),
        };
    }

    TagsyncError::Transport {
        service: service.to_string(),
        message: format!("{} failed: {}", operation, err),
        source: Some(Box::new(err)),
    }
}
