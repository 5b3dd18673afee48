//! In-memory reference sets
//!
//! The schema declares no foreign keys, so dependent writes are checked
//! against sets of currently valid identifiers held here. Each set is an
//! immutable snapshot behind an [`ArcSwap`]: readers load it without locking,
//! a refresh builds a complete replacement and swaps it in, so a reader sees
//! either the old or the new contents and never a mix. Refreshes of the same
//! set are serialised so generations are applied in order.
//!
//! A refresh that cannot reach the store keeps serving the previous ids and
//! marks the set degraded until the next successful refresh.

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::ReferenceError;
use crate::models::ReferenceSet;
use crate::store::{EntityStore, with_deadline};

/// One immutable generation of a reference set
#[derive(Debug, Clone, Default)]
pub struct SetSnapshot {
    ids: Arc<HashSet<i32>>,
    /// Number of successful refreshes so far; 0 until the first load
    pub generation: u64,
    /// Time of the last successful refresh
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Reason the last refresh failed, cleared by the next success
    pub degraded: Option<String>,
}

impl SetSnapshot {
    pub fn contains(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Members in ascending order
    pub fn members(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Health view of one set
#[derive(Debug, Clone, Serialize)]
pub struct SetHealth {
    pub set: ReferenceSet,
    pub members: usize,
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub degraded: Option<String>,
}

struct SetSlot {
    snapshot: ArcSwap<SetSnapshot>,
    refresh_lock: Mutex<()>,
}

impl SetSlot {
    fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(SetSnapshot::default()),
            refresh_lock: Mutex::new(()),
        }
    }
}

/// Owner of every reference set; construct once and share via `Arc`
pub struct ReferenceCache {
    store: Arc<dyn EntityStore>,
    refresh_timeout: Duration,
    zone: SetSlot,
    carpark: SetSlot,
    camera: SetSlot,
}

impl ReferenceCache {
    /// Create a cache with every set empty; call [`load_all`](Self::load_all) before use
    pub fn new(store: Arc<dyn EntityStore>, refresh_timeout: Duration) -> Self {
        Self {
            store,
            refresh_timeout,
            zone: SetSlot::new(),
            carpark: SetSlot::new(),
            camera: SetSlot::new(),
        }
    }

    fn slot(&self, set: ReferenceSet) -> &SetSlot {
        match set {
            ReferenceSet::Zone => &self.zone,
            ReferenceSet::Carpark => &self.carpark,
            ReferenceSet::Camera => &self.camera,
        }
    }

    /// Whether `id` is in the current snapshot of `set`. Never blocks.
    pub fn contains(&self, set: ReferenceSet, id: i32) -> bool {
        self.slot(set).snapshot.load().contains(id)
    }

    /// The current snapshot of `set`; stays valid while held, even across refreshes
    pub fn snapshot(&self, set: ReferenceSet) -> Arc<SetSnapshot> {
        self.slot(set).snapshot.load_full()
    }

    /// Re-read the active ids of `set` from the store and swap them in
    ///
    /// Returns the new member count. On failure the previous ids remain in
    /// place and [`ReferenceError::CacheDegraded`] is returned.
    pub async fn refresh(&self, set: ReferenceSet) -> Result<usize, ReferenceError> {
        let slot = self.slot(set);
        let _guard = slot.refresh_lock.lock().await;

        let operation = format!("refresh {set} reference set");
        let result = with_deadline(
            &operation,
            self.refresh_timeout,
            self.store.list_active_ids(set.source_kind()),
        )
        .await;

        let previous = slot.snapshot.load_full();
        match result {
            Ok(ids) => {
                let next = SetSnapshot {
                    ids: Arc::new(ids.into_iter().collect()),
                    generation: previous.generation + 1,
                    refreshed_at: Some(Utc::now()),
                    degraded: None,
                };
                let members = next.len();
                slot.snapshot.store(Arc::new(next));
                debug!(
                    "Refreshed {} reference set: {} member(s), generation {}",
                    set,
                    members,
                    previous.generation + 1
                );
                Ok(members)
            }
            Err(e) => {
                let message = e.to_string();
                warn!(
                    "Reference set {} degraded, keeping {} member(s) from generation {}: {}",
                    set,
                    previous.len(),
                    previous.generation,
                    message
                );
                slot.snapshot.store(Arc::new(SetSnapshot {
                    ids: previous.ids.clone(),
                    generation: previous.generation,
                    refreshed_at: previous.refreshed_at,
                    degraded: Some(message.clone()),
                }));
                Err(ReferenceError::CacheDegraded { set, message })
            }
        }
    }

    /// Refresh every set. All sets are attempted; the first failure is returned.
    pub async fn load_all(&self) -> Result<(), ReferenceError> {
        let mut first_error = None;
        for set in ReferenceSet::iter() {
            if let Err(e) = self.refresh(set).await {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn health(&self) -> Vec<SetHealth> {
        ReferenceSet::iter()
            .map(|set| {
                let snapshot = self.snapshot(set);
                SetHealth {
                    set,
                    members: snapshot.len(),
                    generation: snapshot.generation,
                    refreshed_at: snapshot.refreshed_at,
                    degraded: snapshot.degraded.clone(),
                }
            })
            .collect()
    }

    pub fn is_degraded(&self) -> bool {
        ReferenceSet::iter().any(|set| self.snapshot(set).degraded.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryError;
    use sea_orm::{DbErr, RuntimeErr};
    use crate::models::EntityKind;
    use crate::store::MockEntityStore;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use tracing_test::traced_test;

    fn cache_with(store: MockEntityStore) -> ReferenceCache {
        ReferenceCache::new(Arc::new(store), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_refresh_converges_with_store() {
        let mut store = MockEntityStore::new();
        store
            .expect_list_active_ids()
            .with(eq(EntityKind::Zone))
            .returning(|_| Ok(vec![1, 2, 3]));
        let cache = cache_with(store);

        assert!(!cache.contains(ReferenceSet::Zone, 1));
        assert_eq!(cache.refresh(ReferenceSet::Zone).await.unwrap(), 3);

        for id in 0..10 {
            assert_eq!(cache.contains(ReferenceSet::Zone, id), (1..=3).contains(&id));
        }
        let snapshot = cache.snapshot(ReferenceSet::Zone);
        assert_eq!(snapshot.generation, 1);
        assert!(snapshot.refreshed_at.is_some());
        assert_eq!(snapshot.members(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let mut store = MockEntityStore::new();
        let mut seq = Sequence::new();
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![1, 2, 3]));
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![3, 4]));
        let cache = cache_with(store);

        cache.refresh(ReferenceSet::Camera).await.unwrap();
        let before = cache.snapshot(ReferenceSet::Camera);
        cache.refresh(ReferenceSet::Camera).await.unwrap();

        // A reader holding the old snapshot keeps a consistent view
        assert_eq!(before.members(), vec![1, 2, 3]);
        assert_eq!(cache.snapshot(ReferenceSet::Camera).members(), vec![3, 4]);
        assert!(!cache.contains(ReferenceSet::Camera, 1));
        assert_eq!(cache.snapshot(ReferenceSet::Camera).generation, 2);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let mut store = MockEntityStore::new();
        let mut seq = Sequence::new();
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![7, 8]));
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(RepositoryError::Database(DbErr::Conn(RuntimeErr::Internal(
                    "connection refused".to_string(),
                ))))
            });
        let cache = cache_with(store);

        cache.refresh(ReferenceSet::Carpark).await.unwrap();
        let err = cache.refresh(ReferenceSet::Carpark).await.unwrap_err();

        assert!(matches!(
            err,
            ReferenceError::CacheDegraded { set: ReferenceSet::Carpark, .. }
        ));
        assert!(cache.contains(ReferenceSet::Carpark, 7));
        assert!(cache.contains(ReferenceSet::Carpark, 8));
        assert!(cache.is_degraded());

        let health = cache.health();
        let carpark = health
            .iter()
            .find(|h| h.set == ReferenceSet::Carpark)
            .unwrap();
        assert_eq!(carpark.members, 2);
        assert_eq!(carpark.generation, 1);
        assert!(carpark.degraded.as_deref().unwrap().contains("connection refused"));
        assert!(logs_contain("Reference set carpark degraded"));
    }

    #[tokio::test]
    async fn test_successful_refresh_clears_degraded() {
        let mut store = MockEntityStore::new();
        let mut seq = Sequence::new();
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(RepositoryError::Timeout {
                    operation: "list".to_string(),
                    timeout_ms: 10,
                })
            });
        store
            .expect_list_active_ids()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![5]));
        let cache = cache_with(store);

        assert!(cache.refresh(ReferenceSet::Zone).await.is_err());
        assert!(cache.snapshot(ReferenceSet::Zone).is_empty());
        assert!(cache.is_degraded());

        cache.refresh(ReferenceSet::Zone).await.unwrap();
        assert!(!cache.is_degraded());
        assert!(cache.contains(ReferenceSet::Zone, 5));
    }

    #[tokio::test]
    async fn test_load_all_attempts_every_set() {
        let mut store = MockEntityStore::new();
        store
            .expect_list_active_ids()
            .with(eq(EntityKind::Zone))
            .times(1)
            .returning(|_| Ok(vec![1]));
        store
            .expect_list_active_ids()
            .with(eq(EntityKind::Carpark))
            .times(1)
            .returning(|_| {
                Err(RepositoryError::Database(DbErr::Conn(RuntimeErr::Internal(
                    "down".to_string(),
                ))))
            });
        store
            .expect_list_active_ids()
            .with(eq(EntityKind::Camera))
            .times(1)
            .returning(|_| Ok(vec![10, 11]));
        let cache = cache_with(store);

        let err = cache.load_all().await.unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::CacheDegraded { set: ReferenceSet::Carpark, .. }
        ));
        assert!(cache.contains(ReferenceSet::Zone, 1));
        assert!(cache.contains(ReferenceSet::Camera, 11));
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_are_serialised() {
        let mut store = MockEntityStore::new();
        store
            .expect_list_active_ids()
            .times(8)
            .returning(|_| Ok(vec![1, 2]));
        let cache = Arc::new(cache_with(store));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.refresh(ReferenceSet::Zone).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(cache.snapshot(ReferenceSet::Zone).generation, 8);
    }
}
