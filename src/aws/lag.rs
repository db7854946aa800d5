//! Direct Connect LAG lookup and tag store
//!
//! LAG tag state rides along on DescribeLags, but the tagging mutation API
//! (TagResource/UntagResource) is ARN-addressed, and DescribeLags does not
//! return the ARN. The store therefore carries the partition, region, and
//! account needed to construct `arn:<partition>:directconnect:<region>:
//! <account>:dxlag/<lag-id>` itself.

use crate::aws::map_service_error;
use crate::aws::types::{dx_tags_to_tag_set, tag_set_to_dx_tags, Lag};
use crate::error::{Result, TagsyncError};
use crate::store::RemoteTagStore;
use crate::tags::{ChangeSet, TagSet};
use crate::validation::validate_lag_id;
use async_trait::async_trait;
use aws_sdk_directconnect::error::ProvideErrorMetadata;
use aws_sdk_directconnect::Client as DxClient;
use tracing::debug;

const SERVICE: &str = "directconnect";

fn lag_not_found(lag_id: &str) -> TagsyncError {
    TagsyncError::ResourceNotFound {
        resource_type: "dx_lag".to_string(),
        resource_id: lag_id.to_string(),
    }
}

/// The API reports a missing LAG as a generic client exception
fn is_lag_not_found<E: ProvideErrorMetadata>(err: &E) -> bool {
    err.code() == Some("DirectConnectClientException")
        && err
            .message()
            .map(|m| m.contains("Could not find Lag"))
            .unwrap_or(false)
}

/// Look up a Direct Connect LAG by ID
///
/// Returns `ResourceNotFound` if the LAG does not exist, whether the API
/// signals that with a client exception or an empty result.
pub async fn find_lag_by_id(client: &DxClient, lag_id: &str) -> Result<Lag> {
    validate_lag_id(lag_id)?;

    let response = match client.describe_lags().lag_id(lag_id).send().await {
        Ok(response) => response,
        Err(e) => {
            let service_err = e.into_service_error();
            if is_lag_not_found(&service_err) {
                return Err(lag_not_found(lag_id));
            }
            return Err(map_service_error(SERVICE, "DescribeLags", service_err));
        }
    };

    let lag = response
        .lags()
        .iter()
        .find(|l| l.lag_id() == Some(lag_id))
        .ok_or_else(|| lag_not_found(lag_id))?;

    Ok(Lag {
        lag_id: lag_id.to_string(),
        name: lag.lag_name().map(String::from),
        connections_bandwidth: lag.connections_bandwidth().map(String::from),
        location: lag.location().map(String::from),
        state: lag
            .lag_state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        owner_account: lag.owner_account().map(String::from),
        number_of_connections: lag.number_of_connections().unwrap_or(0),
        jumbo_frame_capable: lag.jumbo_frame_capable().unwrap_or(false),
        has_logical_redundancy: lag.has_logical_redundancy().map(|h| h.as_str().to_string()),
        provider_name: lag.provider_name().map(String::from),
        tags: dx_tags_to_tag_set(lag.tags()),
    })
}

/// `RemoteTagStore` over the Direct Connect tagging API
///
/// `object_id` is the LAG ID; the store builds the ARN the mutation calls
/// require from its configured partition, region, and account.
pub struct LagTagStore {
    client: DxClient,
    partition: String,
    region: String,
    account_id: String,
}

impl LagTagStore {
    pub fn new(
        client: DxClient,
        region: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            partition: "aws".to_string(),
            region: region.into(),
            account_id: account_id.into(),
        }
    }

    pub fn with_partition(mut self, partition: impl Into<String>) -> Self {
        self.partition = partition.into();
        self
    }

    fn lag_arn(&self, lag_id: &str) -> String {
        format!(
            "arn:{}:directconnect:{}:{}:dxlag/{}",
            self.partition, self.region, self.account_id, lag_id
        )
    }
}

#[async_trait]
impl RemoteTagStore for LagTagStore {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_tags(&self, object_id: &str) -> Result<TagSet> {
        let lag = find_lag_by_id(&self.client, object_id).await?;
        Ok(lag.tags)
    }

    async fn apply_tag_changes(&self, object_id: &str, changes: &ChangeSet) -> Result<()> {
        let arn = self.lag_arn(object_id);

        if !changes.to_set.is_empty() {
            debug!(lag_id = object_id, count = changes.to_set.len(), "TagResource");
            self.client
                .tag_resource()
                .resource_arn(&arn)
                .set_tags(Some(tag_set_to_dx_tags(&changes.to_set)?))
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if is_lag_not_found(&service_err) {
                        lag_not_found(object_id)
                    } else {
                        map_service_error(SERVICE, "TagResource", service_err)
                    }
                })?;
        }

        if !changes.to_remove.is_empty() {
            debug!(
                lag_id = object_id,
                count = changes.to_remove.len(),
                "UntagResource"
            );
            self.client
                .untag_resource()
                .resource_arn(&arn)
                .set_tag_keys(Some(changes.to_remove.iter().cloned().collect()))
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if is_lag_not_found(&service_err) {
                        lag_not_found(object_id)
                    } else {
                        map_service_error(SERVICE, "UntagResource", service_err)
                    }
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_arn_format() {
        let config = aws_sdk_directconnect::Config::builder()
            .behavior_version(aws_sdk_directconnect::config::BehaviorVersion::latest())
            .build();
        let store = LagTagStore::new(
            DxClient::from_conf(config),
            "us-west-2",
            "123456789012",
        );
        assert_eq!(
            store.lag_arn("dxlag-fgk9b02l"),
            "arn:aws:directconnect:us-west-2:123456789012:dxlag/dxlag-fgk9b02l"
        );
    }

    #[test]
    fn test_lag_arn_partition_override() {
        let config = aws_sdk_directconnect::Config::builder()
            .behavior_version(aws_sdk_directconnect::config::BehaviorVersion::latest())
            .build();
        let store = LagTagStore::new(DxClient::from_conf(config), "cn-north-1", "123456789012")
            .with_partition("aws-cn");
        assert!(store
            .lag_arn("dxlag-fgk9b02l")
            .starts_with("arn:aws-cn:directconnect:cn-north-1:"));
    }
}
