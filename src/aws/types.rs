//! Type definitions for AWS resources
//!
//! Typed summaries returned by the lookup helpers, plus conversions between
//! the SDK tag list shapes and `TagSet`.

use crate::error::{Result, TagsyncError};
use crate::tags::TagSet;
use serde::{Deserialize, Serialize};

/// Summary of a VPC as observed remotely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vpc {
    pub vpc_id: String,
    pub cidr_block: Option<String>,
    pub state: String,
    pub is_default: bool,
    pub owner_id: Option<String>,
    pub tags: TagSet,
}

/// Summary of a Direct Connect LAG as observed remotely
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lag {
    pub lag_id: String,
    pub name: Option<String>,
    pub connections_bandwidth: Option<String>,
    pub location: Option<String>,
    pub state: String,
    pub owner_account: Option<String>,
    pub number_of_connections: i32,
    pub jumbo_frame_capable: bool,
    pub has_logical_redundancy: Option<String>,
    pub provider_name: Option<String>,
    pub tags: TagSet,
}

/// Extract a TagSet from an EC2 tag list
///
/// Pairs with a missing key or value are skipped; the API does not produce
/// them for resources this crate manages.
pub(crate) fn ec2_tags_to_tag_set(tags: &[aws_sdk_ec2::types::Tag]) -> TagSet {
    tags.iter()
        .filter_map(|tag| tag.key().zip(tag.value()))
        .collect()
}

pub(crate) fn tag_set_to_ec2_tags(tags: &TagSet) -> Vec<aws_sdk_ec2::types::Tag> {
    tags.iter()
        .map(|(k, v)| aws_sdk_ec2::types::Tag::builder().key(k).value(v).build())
        .collect()
}

/// Extract a TagSet from a Direct Connect tag list
///
/// A missing value is an empty-string tag: the Direct Connect API models the
/// value as optional but tagsync treats "present with no value" as "".
pub(crate) fn dx_tags_to_tag_set(tags: &[aws_sdk_directconnect::types::Tag]) -> TagSet {
    tags.iter()
        .map(|tag| (tag.key(), tag.value().unwrap_or_default()))
        .collect()
}

pub(crate) fn tag_set_to_dx_tags(
    tags: &TagSet,
) -> Result<Vec<aws_sdk_directconnect::types::Tag>> {
    tags.iter()
        .map(|(k, v)| {
            aws_sdk_directconnect::types::Tag::builder()
                .key(k)
                .value(v)
                .build()
                .map_err(|e| TagsyncError::Validation {
                    field: "tag_key".to_string(),
                    reason: format!("Invalid Direct Connect tag: {}", e),
                })
        })
        .collect()
}
