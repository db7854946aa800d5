//! Remote tag store trait
//!
//! The seam between the pure merge/diff core and the cloud tagging APIs.
//! Implementations live in `src/aws/` (one per resource family); the
//! reconcile driver in `src/reconcile.rs` works against this trait so it can
//! be tested with an in-memory double.

use crate::error::Result;
use crate::tags::{ChangeSet, TagSet};
use async_trait::async_trait;

/// Read/write access to the live tag state of one class of remote objects
///
/// `object_id` is whatever identifier the underlying tagging API is
/// addressed by (a resource ID for EC2, an ARN for Direct Connect); each
/// implementation documents its expectation.
#[async_trait]
pub trait RemoteTagStore: Send + Sync {
    /// Service name for logging and error context
    fn service(&self) -> &'static str;

    /// Fetch the live tag state of a remote object
    ///
    /// Returns `TagsyncError::ResourceNotFound` if the object no longer
    /// exists; callers treat that as deleted, not as a transient failure.
    async fn fetch_tags(&self, object_id: &str) -> Result<TagSet>;

    /// Apply a computed change-set to a remote object
    ///
    /// Sets every pair in `changes.to_set` and deletes every key in
    /// `changes.to_remove`. Implementations skip the API calls for empty
    /// halves. Transient failures surface as retryable `Transport` errors.
    async fn apply_tag_changes(&self, object_id: &str, changes: &ChangeSet) -> Result<()>;
}
