//! Persistence collaborator for the consistency layer
//!
//! The reference cache and the lifecycle guard only ever talk to the database
//! through [`EntityStore`]. It exposes the four calls they need and nothing
//! else, which keeps both components testable against a mock.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::errors::{RepositoryError, RepositoryResult};
use crate::models::{EntityKey, EntityKind, LifecycleState};

pub mod sea_orm_store;

pub use sea_orm_store::SeaOrmEntityStore;

/// Narrow store interface used by the reference cache and lifecycle guard
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Identifiers currently valid as reference targets for `kind`
    ///
    /// Zones report their `zone_id`, cameras and carparks their `id`.
    /// Soft-deleted rows are never included.
    async fn list_active_ids(&self, kind: EntityKind) -> RepositoryResult<Vec<i32>>;

    /// Current lifecycle pair of a row, `None` when no row has this key
    async fn get_lifecycle(
        &self,
        kind: EntityKind,
        key: &EntityKey,
    ) -> RepositoryResult<Option<LifecycleState>>;

    /// Write `is_enabled = desired` only if the row is live and still has
    /// `is_enabled = observed`. Returns the number of rows changed.
    async fn set_enabled_if(
        &self,
        kind: EntityKind,
        key: &EntityKey,
        observed: bool,
        desired: bool,
    ) -> RepositoryResult<u64>;

    /// Mark a live row deleted. Returns 0 if it was already deleted or absent.
    async fn soft_delete(&self, kind: EntityKind, key: &EntityKey) -> RepositoryResult<u64>;
}

/// Run a store call under a deadline
///
/// On expiry the inner future is dropped, which cancels the in-flight query.
pub async fn with_deadline<T, F>(
    operation: &str,
    deadline: Duration,
    future: F,
) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    match tokio::time::timeout(deadline, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!("{} exceeded its {:?} deadline", operation, deadline);
            Err(RepositoryError::Timeout {
                operation: operation.to_string(),
                timeout_ms: deadline.as_millis(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let result = with_deadline("noop", Duration::from_secs(1), async { Ok(3u64) }).await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_deadline_expires() {
        let result: RepositoryResult<u64> = with_deadline("slow", Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        })
        .await;

        match result {
            Err(RepositoryError::Timeout { operation, timeout_ms }) => {
                assert_eq!(operation, "slow");
                assert_eq!(timeout_ms, 50);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
