//! Lifecycle guard
//!
//! Enforces the enabled/disabled/deleted state machine for zones, cameras,
//! signs, clients and users:
//!
//! ```text
//! created (disabled) <-> enabled
//!        \              /
//!         +-> deleted <-+   (terminal)
//! ```
//!
//! Every enable/disable is a conditional write on the state observed just
//! before it, so two concurrent transitions cannot both succeed.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{AppResult, LifecycleError};
use crate::models::{EntityKey, EntityKind, LifecycleState, LifecyclePhase};
use crate::services::reference_cache::ReferenceCache;
use crate::services::refresh_after_write;
use crate::store::{EntityStore, with_deadline};

/// A state change that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub rows_affected: u64,
    pub from: LifecyclePhase,
    pub to: LifecyclePhase,
}

/// Result of a soft delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    /// 1 when this call deleted the row, 0 when it was already deleted
    pub rows_affected: u64,
    /// Set when the follow-up cache refresh failed
    pub cache_warning: Option<String>,
}

pub struct LifecycleGuard {
    store: Arc<dyn EntityStore>,
    cache: Arc<ReferenceCache>,
    operation_timeout: Duration,
}

impl LifecycleGuard {
    pub fn new(
        store: Arc<dyn EntityStore>,
        cache: Arc<ReferenceCache>,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            operation_timeout,
        }
    }

    fn require_lifecycle(kind: EntityKind) -> Result<(), LifecycleError> {
        if kind.has_lifecycle() {
            Ok(())
        } else {
            Err(LifecycleError::Unsupported { kind })
        }
    }

    /// Read the lifecycle pair of a row, failing with `NotFound` if there is none
    pub async fn current_state(
        &self,
        kind: EntityKind,
        key: &EntityKey,
    ) -> AppResult<LifecycleState> {
        Self::require_lifecycle(kind)?;
        let state = with_deadline(
            "read lifecycle state",
            self.operation_timeout,
            self.store.get_lifecycle(kind, key),
        )
        .await?;

        state.ok_or_else(|| {
            LifecycleError::NotFound {
                kind,
                key: key.clone(),
            }
            .into()
        })
    }

    /// Enable or disable a row
    ///
    /// Fails with `TerminalState` on a deleted row, `NoOpTransition` when the
    /// row is already in the requested state, and `StaleTransition` when the
    /// row changed between the read and the conditional write.
    pub async fn set_enabled(
        &self,
        kind: EntityKind,
        key: &EntityKey,
        desired: bool,
    ) -> AppResult<Transition> {
        let observed = self.current_state(kind, key).await?;

        if observed.is_terminal() {
            info!("Rejected state change on deleted {} {}", kind, key);
            return Err(LifecycleError::TerminalState {
                kind,
                key: key.clone(),
            }
            .into());
        }

        if observed.is_enabled == desired {
            info!(
                "Rejected no-op state change on {} {}: already {}",
                kind,
                key,
                observed.phase()
            );
            return Err(LifecycleError::NoOpTransition {
                kind,
                key: key.clone(),
                state: if desired { "enabled" } else { "disabled" },
            }
            .into());
        }

        let rows_affected = with_deadline(
            "write lifecycle state",
            self.operation_timeout,
            self.store
                .set_enabled_if(kind, key, observed.is_enabled, desired),
        )
        .await?;

        if rows_affected == 0 {
            info!("State of {} {} moved during transition", kind, key);
            return Err(LifecycleError::StaleTransition {
                kind,
                key: key.clone(),
            }
            .into());
        }

        let to = LifecycleState::new(desired, false).phase();
        debug!("{} {}: {} -> {}", kind, key, observed.phase(), to);
        Ok(Transition {
            rows_affected,
            from: observed.phase(),
            to,
        })
    }

    /// Soft-delete a row and refresh the reference set it backs, if any
    ///
    /// Deleting an already-deleted row succeeds with `rows_affected = 0`.
    /// A key that never existed is `NotFound`.
    pub async fn soft_delete(&self, kind: EntityKind, key: &EntityKey) -> AppResult<DeleteOutcome> {
        Self::require_lifecycle(kind)?;

        let rows_affected = with_deadline(
            "soft delete",
            self.operation_timeout,
            self.store.soft_delete(kind, key),
        )
        .await?;

        if rows_affected == 0 {
            // Either already deleted or absent
            self.current_state(kind, key).await?;
            debug!("{} {} was already deleted", kind, key);
        } else {
            info!("Soft-deleted {} {}", kind, key);
        }

        let cache_warning = match kind.reference_set() {
            Some(set) => refresh_after_write(&self.cache, set).await,
            None => None,
        };

        Ok(DeleteOutcome {
            rows_affected,
            cache_warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, RepositoryError};
    use crate::models::ReferenceSet;
    use crate::store::MockEntityStore;
    use mockall::predicate::{always, eq};
    use rstest::rstest;
    use sea_orm::{DbErr, RuntimeErr};

    fn guard_with(store: MockEntityStore) -> (LifecycleGuard, Arc<ReferenceCache>) {
        let store: Arc<dyn EntityStore> = Arc::new(store);
        let cache = Arc::new(ReferenceCache::new(store.clone(), Duration::from_secs(1)));
        (
            LifecycleGuard::new(store, cache.clone(), Duration::from_secs(1)),
            cache,
        )
    }

    fn lifecycle_error(result: AppResult<impl std::fmt::Debug>) -> LifecycleError {
        match result {
            Err(AppError::Lifecycle(e)) => e,
            other => panic!("expected lifecycle error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_enable_writes_conditionally_on_observed_state() {
        let mut store = MockEntityStore::new();
        store
            .expect_get_lifecycle()
            .returning(|_, _| Ok(Some(LifecycleState::CREATED)));
        store
            .expect_set_enabled_if()
            .with(eq(EntityKind::Camera), eq(EntityKey::Int(4)), eq(false), eq(true))
            .times(1)
            .returning(|_, _, _, _| Ok(1));
        let (guard, _) = guard_with(store);

        let transition = guard
            .set_enabled(EntityKind::Camera, &EntityKey::Int(4), true)
            .await
            .unwrap();
        assert_eq!(
            transition,
            Transition {
                rows_affected: 1,
                from: LifecyclePhase::Disabled,
                to: LifecyclePhase::Enabled,
            }
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn test_deleted_row_is_terminal(#[case] desired: bool) {
        let mut store = MockEntityStore::new();
        store
            .expect_get_lifecycle()
            .returning(|_, _| Ok(Some(LifecycleState::new(false, true))));
        store.expect_set_enabled_if().never();
        let (guard, _) = guard_with(store);

        let err = lifecycle_error(
            guard
                .set_enabled(EntityKind::Zone, &EntityKey::Int(5), desired)
                .await,
        );
        assert_eq!(
            err,
            LifecycleError::TerminalState {
                kind: EntityKind::Zone,
                key: EntityKey::Int(5),
            }
        );
    }

    #[rstest]
    #[case(true, "enabled")]
    #[case(false, "disabled")]
    #[tokio::test]
    async fn test_same_state_is_rejected(#[case] current: bool, #[case] label: &'static str) {
        let mut store = MockEntityStore::new();
        store
            .expect_get_lifecycle()
            .returning(move |_, _| Ok(Some(LifecycleState::new(current, false))));
        store.expect_set_enabled_if().never();
        let (guard, _) = guard_with(store);

        let key = EntityKey::from("client-a");
        let err = lifecycle_error(guard.set_enabled(EntityKind::Client, &key, current).await);
        assert_eq!(
            err,
            LifecycleError::NoOpTransition {
                kind: EntityKind::Client,
                key,
                state: label,
            }
        );
    }

    #[tokio::test]
    async fn test_lost_race_reports_stale_transition() {
        let mut store = MockEntityStore::new();
        store
            .expect_get_lifecycle()
            .returning(|_, _| Ok(Some(LifecycleState::new(true, false))));
        store
            .expect_set_enabled_if()
            .returning(|_, _, _, _| Ok(0));
        let (guard, _) = guard_with(store);

        let err = lifecycle_error(
            guard
                .set_enabled(EntityKind::Sign, &EntityKey::Int(2), false)
                .await,
        );
        assert!(matches!(err, LifecycleError::StaleTransition { .. }));
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let mut store = MockEntityStore::new();
        store.expect_get_lifecycle().returning(|_, _| Ok(None));
        store.expect_soft_delete().returning(|_, _| Ok(0));
        let (guard, _) = guard_with(store);

        let key = EntityKey::from("ghost");
        let err = lifecycle_error(guard.set_enabled(EntityKind::User, &key, true).await);
        assert!(matches!(err, LifecycleError::NotFound { .. }));

        let err = lifecycle_error(guard.soft_delete(EntityKind::User, &key).await);
        assert!(matches!(err, LifecycleError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_carpark_has_no_lifecycle() {
        let (guard, _) = guard_with(MockEntityStore::new());
        let err = lifecycle_error(
            guard
                .set_enabled(EntityKind::Carpark, &EntityKey::Int(1), true)
                .await,
        );
        assert_eq!(err, LifecycleError::Unsupported { kind: EntityKind::Carpark });
    }

    #[tokio::test]
    async fn test_soft_delete_refreshes_backing_set() {
        let mut store = MockEntityStore::new();
        store
            .expect_soft_delete()
            .with(eq(EntityKind::Zone), eq(EntityKey::Int(5)))
            .returning(|_, _| Ok(1));
        store
            .expect_list_active_ids()
            .with(eq(EntityKind::Zone))
            .times(1)
            .returning(|_| Ok(vec![1, 2, 3]));
        let (guard, cache) = guard_with(store);

        let outcome = guard.soft_delete(EntityKind::Zone, &EntityKey::Int(5)).await.unwrap();
        assert_eq!(outcome.rows_affected, 1);
        assert_eq!(outcome.cache_warning, None);
        assert!(!cache.contains(ReferenceSet::Zone, 5));
        assert!(cache.contains(ReferenceSet::Zone, 3));
    }

    #[tokio::test]
    async fn test_second_delete_is_a_no_op_success() {
        let mut store = MockEntityStore::new();
        store.expect_soft_delete().returning(|_, _| Ok(0));
        store
            .expect_get_lifecycle()
            .returning(|_, _| Ok(Some(LifecycleState::new(true, true))));
        let (guard, _) = guard_with(store);

        let outcome = guard
            .soft_delete(EntityKind::Sign, &EntityKey::Int(9))
            .await
            .unwrap();
        assert_eq!(outcome.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_after_delete_is_a_warning() {
        let mut store = MockEntityStore::new();
        store.expect_soft_delete().returning(|_, _| Ok(1));
        store.expect_list_active_ids().with(always()).returning(|_| {
            Err(RepositoryError::Database(DbErr::Conn(RuntimeErr::Internal(
                "pool closed".to_string(),
            ))))
        });
        let (guard, _) = guard_with(store);

        let outcome = guard
            .soft_delete(EntityKind::Camera, &EntityKey::Int(3))
            .await
            .unwrap();
        assert_eq!(outcome.rows_affected, 1);
        assert!(outcome.cache_warning.unwrap().contains("camera"));
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_lifecycle_error() {
        let mut store = MockEntityStore::new();
        store.expect_get_lifecycle().returning(|_, _| {
            Err(RepositoryError::Database(DbErr::Conn(RuntimeErr::Internal(
                "refused".to_string(),
            ))))
        });
        let (guard, _) = guard_with(store);

        let result = guard.set_enabled(EntityKind::Zone, &EntityKey::Int(1), true).await;
        assert!(matches!(result, Err(AppError::Repository(_))));
    }
}
