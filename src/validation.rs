//! Input validation utilities
//!
//! Provides validation functions for tag keys, tag values, and resource
//! identifiers before they are handed to the remote tagging APIs.

use crate::error::{Result, TagsyncError};
use crate::tags::TagSet;

/// Reserved tag namespace owned by AWS; user-supplied tags may not use it
pub const AWS_RESERVED_PREFIX: &str = "aws:";

/// Maximum tag key length accepted by the EC2 and Direct Connect tagging APIs
pub const MAX_TAG_KEY_LEN: usize = 128;

/// Maximum tag value length accepted by the EC2 and Direct Connect tagging APIs
pub const MAX_TAG_VALUE_LEN: usize = 256;

/// Validate a user-supplied tag key
///
/// Keys must be non-empty, at most 128 characters, outside the reserved
/// `aws:` namespace, and free of control characters.
pub fn validate_tag_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(TagsyncError::Validation {
            field: "tag_key".to_string(),
            reason: "Tag key must not be empty".to_string(),
        });
    }

    if key.chars().count() > MAX_TAG_KEY_LEN {
        return Err(TagsyncError::Validation {
            field: "tag_key".to_string(),
            reason: format!(
                "Tag key must be at most {} characters, got {} ({})",
                MAX_TAG_KEY_LEN,
                key.chars().count(),
                key
            ),
        });
    }

    if key.starts_with(AWS_RESERVED_PREFIX) {
        return Err(TagsyncError::Validation {
            field: "tag_key".to_string(),
            reason: format!(
                "Tag key must not use the reserved '{}' prefix, got: {}",
                AWS_RESERVED_PREFIX, key
            ),
        });
    }

    if key.chars().any(char::is_control) {
        return Err(TagsyncError::Validation {
            field: "tag_key".to_string(),
            reason: format!("Tag key must not contain control characters, got: {:?}", key),
        });
    }

    Ok(())
}

/// Validate a tag value
///
/// Values may be empty (an empty value is a valid, present tag) but must be
/// at most 256 characters and free of control characters.
pub fn validate_tag_value(key: &str, value: &str) -> Result<()> {
    if value.chars().count() > MAX_TAG_VALUE_LEN {
        return Err(TagsyncError::Validation {
            field: "tag_value".to_string(),
            reason: format!(
                "Value for tag '{}' must be at most {} characters, got {}",
                key,
                MAX_TAG_VALUE_LEN,
                value.chars().count()
            ),
        });
    }

    if value.chars().any(char::is_control) {
        return Err(TagsyncError::Validation {
            field: "tag_value".to_string(),
            reason: format!(
                "Value for tag '{}' must not contain control characters",
                key
            ),
        });
    }

    Ok(())
}

/// Validate every pair in a user-supplied tag set
pub fn validate_tag_set(tags: &TagSet) -> Result<()> {
    for (key, value) in tags.iter() {
        validate_tag_key(key)?;
        validate_tag_value(key, value)?;
    }
    Ok(())
}

/// Validate a VPC ID format
///
/// VPC IDs start with "vpc-" followed by hexadecimal characters.
pub fn validate_vpc_id(vpc_id: &str) -> Result<()> {
    if !vpc_id.starts_with("vpc-") {
        return Err(TagsyncError::Validation {
            field: "vpc_id".to_string(),
            reason: format!("VPC ID must start with 'vpc-', got: {}", vpc_id),
        });
    }

    let id_part = &vpc_id[4..];
    if id_part.len() < 8 || id_part.len() > 17 {
        return Err(TagsyncError::Validation {
            field: "vpc_id".to_string(),
            reason: format!(
                "VPC ID must have 8-17 characters after 'vpc-', got: {} (len: {})",
                vpc_id,
                id_part.len()
            ),
        });
    }

    if !id_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TagsyncError::Validation {
            field: "vpc_id".to_string(),
            reason: format!(
                "VPC ID must contain only hex characters after 'vpc-', got: {}",
                vpc_id
            ),
        });
    }

    Ok(())
}

/// Validate a Direct Connect LAG ID format
///
/// LAG IDs start with "dxlag-" followed by alphanumeric characters.
pub fn validate_lag_id(lag_id: &str) -> Result<()> {
    if !lag_id.starts_with("dxlag-") {
        return Err(TagsyncError::Validation {
            field: "lag_id".to_string(),
            reason: format!("LAG ID must start with 'dxlag-', got: {}", lag_id),
        });
    }

    let id_part = &lag_id[6..];
    if id_part.is_empty() || !id_part.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TagsyncError::Validation {
            field: "lag_id".to_string(),
            reason: format!(
                "LAG ID must contain only alphanumeric characters after 'dxlag-', got: {}",
                lag_id
            ),
        });
    }

    Ok(())
}
