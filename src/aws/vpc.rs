//! VPC lookup and tag store
//!
//! VPCs are tagged through the EC2 API, addressed by resource ID. The tag
//! state rides along on DescribeVpcs, so fetching tags and confirming the
//! VPC still exists is a single call.

use crate::aws::map_service_error;
use crate::aws::types::{ec2_tags_to_tag_set, tag_set_to_ec2_tags, Vpc};
use crate::error::{Result, TagsyncError};
use crate::store::RemoteTagStore;
use crate::tags::{ChangeSet, TagSet};
use crate::validation::validate_vpc_id;
use async_trait::async_trait;
use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_sdk_ec2::Client as Ec2Client;
use tracing::debug;

const SERVICE: &str = "ec2";

fn vpc_not_found(vpc_id: &str) -> TagsyncError {
    TagsyncError::ResourceNotFound {
        resource_type: "vpc".to_string(),
        resource_id: vpc_id.to_string(),
    }
}

/// Look up a VPC by ID
///
/// Returns `ResourceNotFound` if the VPC does not exist, whether the API
/// signals that with an error code or an empty result page.
pub async fn find_vpc_by_id(client: &Ec2Client, vpc_id: &str) -> Result<Vpc> {
    validate_vpc_id(vpc_id)?;

    let response = match client.describe_vpcs().vpc_ids(vpc_id).send().await {
        Ok(response) => response,
        Err(e) => {
            let service_err = e.into_service_error();
            if service_err.code() == Some("InvalidVpcID.NotFound") {
                return Err(vpc_not_found(vpc_id));
            }
            return Err(map_service_error(SERVICE, "DescribeVpcs", service_err));
        }
    };

    let vpc = response
        .vpcs()
        .iter()
        .find(|v| v.vpc_id() == Some(vpc_id))
        .ok_or_else(|| vpc_not_found(vpc_id))?;

    Ok(Vpc {
        vpc_id: vpc_id.to_string(),
        cidr_block: vpc.cidr_block().map(String::from),
        state: vpc
            .state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        is_default: vpc.is_default().unwrap_or(false),
        owner_id: vpc.owner_id().map(String::from),
        tags: ec2_tags_to_tag_set(vpc.tags()),
    })
}

/// `RemoteTagStore` over the EC2 tagging API
///
/// `object_id` is the VPC ID.
pub struct VpcTagStore {
    client: Ec2Client,
}

impl VpcTagStore {
    pub fn new(client: Ec2Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteTagStore for VpcTagStore {
    fn service(&self) -> &'static str {
        SERVICE
    }

    async fn fetch_tags(&self, object_id: &str) -> Result<TagSet> {
        let vpc = find_vpc_by_id(&self.client, object_id).await?;
        Ok(vpc.tags)
    }

    async fn apply_tag_changes(&self, object_id: &str, changes: &ChangeSet) -> Result<()> {
        if !changes.to_set.is_empty() {
            debug!(vpc_id = object_id, count = changes.to_set.len(), "CreateTags");
            self.client
                .create_tags()
                .resources(object_id)
                .set_tags(Some(tag_set_to_ec2_tags(&changes.to_set)))
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if service_err.code() == Some("InvalidVpcID.NotFound") {
                        vpc_not_found(object_id)
                    } else {
                        map_service_error(SERVICE, "CreateTags", service_err)
                    }
                })?;
        }

        if !changes.to_remove.is_empty() {
            debug!(
                vpc_id = object_id,
                count = changes.to_remove.len(),
                "DeleteTags"
            );
            // Key-only tags delete the key regardless of its remote value
            let keys: Vec<aws_sdk_ec2::types::Tag> = changes
                .to_remove
                .iter()
                .map(|k| aws_sdk_ec2::types::Tag::builder().key(k).build())
                .collect();
            self.client
                .delete_tags()
                .resources(object_id)
                .set_tags(Some(keys))
                .send()
                .await
                .map_err(|e| {
                    let service_err = e.into_service_error();
                    if service_err.code() == Some("InvalidVpcID.NotFound") {
                        vpc_not_found(object_id)
                    } else {
                        map_service_error(SERVICE, "DeleteTags", service_err)
                    }
                })?;
        }

        Ok(())
    }
}
