//! Per-object tag reconciliation driver
//!
//! One read-merge-diff-apply pass over a single remote object: fetch its
//! live tags, merge the desired views, compute the minimal change-set, and
//! apply it if nonempty. The merge/diff steps are pure; all remote access
//! goes through the `RemoteTagStore` seam.
//!
//! The driver holds no state between calls and provides no cross-object
//! serialization. Callers must ensure at most one in-flight reconciliation
//! per remote object, or concurrent passes can lose updates to each other.

use crate::error::Result;
use crate::retry::RetryPolicy;
use crate::store::RemoteTagStore;
use crate::tags::{diff, merge, ChangeSet, IgnoreRules, TagMerge, TagSet};
use crate::validation::validate_tag_set;
use tracing::{debug, info};

/// What a reconciliation pass did to the remote object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Remote tags already matched the desired state; nothing was applied
    Converged,
    /// The change-set that was applied
    Updated(ChangeSet),
    /// The remote object no longer exists; the caller should treat it as
    /// deleted rather than retry tagging
    Gone,
}

/// Result of a reconciliation pass: the merged views plus what was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub merge: TagMerge,
    pub outcome: ReconcileOutcome,
}

/// Run one reconciliation pass against a remote object
///
/// Fetches current tags, merges `default_tags` and `resource_tags` under the
/// ignore rules, and applies the drift, retrying transient apply failures per
/// `policy`. A vanished object yields `ReconcileOutcome::Gone` instead of an
/// error. Because merge and diff are deterministic, a retried apply can
/// always recompute from freshly fetched tags without double-applying a
/// stale change.
///
/// The merged set is validated before any remote call; a reserved-prefix or
/// over-long tag fails fast with a `Validation` error instead of an API
/// rejection mid-apply.
pub async fn reconcile_tags<S, P>(
    store: &S,
    object_id: &str,
    default_tags: &TagSet,
    resource_tags: &TagSet,
    ignore: &IgnoreRules,
    policy: &P,
) -> Result<ReconcileReport>
where
    S: RemoteTagStore + ?Sized,
    P: RetryPolicy,
{
    let merged = merge(default_tags, resource_tags, ignore);
    validate_tag_set(&merged.merged)?;

    let current = match store.fetch_tags(object_id).await {
        Ok(tags) => tags,
        Err(e) if e.is_not_found() => {
            info!(
                service = store.service(),
                object_id, "Object gone, skipping tag reconciliation"
            );
            return Ok(ReconcileReport {
                merge: merged,
                outcome: ReconcileOutcome::Gone,
            });
        }
        Err(e) => return Err(e),
    };

    let changes = diff(&current, &merged.merged, ignore);
    if changes.is_empty() {
        debug!(
            service = store.service(),
            object_id, "Tags already converged"
        );
        return Ok(ReconcileReport {
            merge: merged,
            outcome: ReconcileOutcome::Converged,
        });
    }

    info!(
        service = store.service(),
        object_id,
        set = changes.to_set.len(),
        remove = changes.to_remove.len(),
        "Applying tag changes"
    );
    policy
        .execute_with_retry(|| async { store.apply_tag_changes(object_id, &changes).await })
        .await?;

    Ok(ReconcileReport {
        merge: merged,
        outcome: ReconcileOutcome::Updated(changes),
    })
}
