//! Reference validation for dependent writes
//!
//! Checks run against the reference cache, never the store. Each dependent
//! entity kind has one policy applied to all of its reference fields:
//! `Reject` fails the write on the first unknown reference, `CoerceToUnassigned`
//! rewrites unknown references to [`UNASSIGNED_ID`] and lets the write proceed.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ValidationConfig;
use crate::errors::ReferenceError;
use crate::models::{EntityKind, ReferencePolicy, ReferenceSet, UNASSIGNED_ID};
use crate::services::reference_cache::ReferenceCache;

/// One reference field of a dependent write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCheck {
    pub field: &'static str,
    pub set: ReferenceSet,
    pub id: i32,
}

impl ReferenceCheck {
    pub fn new(field: &'static str, set: ReferenceSet, id: i32) -> Self {
        Self { field, set, id }
    }
}

pub struct Validator {
    cache: Arc<ReferenceCache>,
    policies: ValidationConfig,
}

impl Validator {
    pub fn new(cache: Arc<ReferenceCache>, policies: ValidationConfig) -> Self {
        Self { cache, policies }
    }

    pub fn policy_for(&self, kind: EntityKind) -> ReferencePolicy {
        self.policies.policy_for(kind)
    }

    /// Check every reference; the first one missing from its set is reported
    pub fn validate(&self, checks: &[ReferenceCheck]) -> Result<(), ReferenceError> {
        match checks
            .iter()
            .find(|check| !self.cache.contains(check.set, check.id))
        {
            Some(check) => {
                info!(
                    "Rejected reference {} = {}: not a valid {}",
                    check.field, check.id, check.set
                );
                Err(ReferenceError::InvalidReference {
                    field: check.field,
                    set: check.set,
                    id: check.id,
                })
            }
            None => Ok(()),
        }
    }

    /// Apply the configured policy for `kind` and return the ids to persist,
    /// in the same order as `checks`
    pub fn resolve<const N: usize>(
        &self,
        kind: EntityKind,
        checks: [ReferenceCheck; N],
    ) -> Result<[i32; N], ReferenceError> {
        match self.policy_for(kind) {
            ReferencePolicy::Reject => {
                self.validate(&checks)?;
                Ok(checks.map(|check| check.id))
            }
            ReferencePolicy::CoerceToUnassigned => Ok(checks.map(|check| {
                if self.cache.contains(check.set, check.id) {
                    check.id
                } else {
                    if check.id != UNASSIGNED_ID {
                        info!(
                            "{} {} = {} is not a valid {}, storing {}",
                            kind, check.field, check.id, check.set, UNASSIGNED_ID
                        );
                    }
                    UNASSIGNED_ID
                }
            })),
        }
    }

    /// The id being created must not already be a member of its own set
    pub fn require_absent(&self, set: ReferenceSet, id: i32) -> Result<(), ReferenceError> {
        if self.cache.contains(set, id) {
            debug!("{} {} already exists", set, id);
            return Err(ReferenceError::AlreadyExists { set, id });
        }
        Ok(())
    }

    /// The id being updated must be a member of its own set
    pub fn require_member(&self, set: ReferenceSet, id: i32) -> Result<(), ReferenceError> {
        if !self.cache.contains(set, id) {
            debug!("{} {} is not a member", set, id);
            return Err(ReferenceError::NotMember { set, id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockEntityStore;
    use std::time::Duration;

    async fn validator(policies: ValidationConfig) -> Validator {
        let mut store = MockEntityStore::new();
        store
            .expect_list_active_ids()
            .returning(|kind| match kind {
                EntityKind::Zone => Ok(vec![1, 2, 3]),
                EntityKind::Carpark => Ok(vec![10]),
                _ => Ok(vec![100, 101]),
            });
        let cache = Arc::new(ReferenceCache::new(Arc::new(store), Duration::from_secs(1)));
        cache.load_all().await.unwrap();
        Validator::new(cache, policies)
    }

    fn camera_checks(zone_id_in: i32, zone_id_out: i32) -> [ReferenceCheck; 2] {
        [
            ReferenceCheck::new("zone_id_in", ReferenceSet::Zone, zone_id_in),
            ReferenceCheck::new("zone_id_out", ReferenceSet::Zone, zone_id_out),
        ]
    }

    #[tokio::test]
    async fn test_camera_coerces_unknown_zone_to_unassigned() {
        let validator = validator(ValidationConfig::default()).await;
        let resolved = validator
            .resolve(EntityKind::Camera, camera_checks(2, 9))
            .unwrap();
        assert_eq!(resolved, [2, UNASSIGNED_ID]);
    }

    #[tokio::test]
    async fn test_camera_rejects_when_configured() {
        let policies = ValidationConfig {
            camera: ReferencePolicy::Reject,
            ..ValidationConfig::default()
        };
        let validator = validator(policies).await;
        let err = validator
            .resolve(EntityKind::Camera, camera_checks(2, 9))
            .unwrap_err();
        assert_eq!(
            err,
            ReferenceError::InvalidReference {
                field: "zone_id_out",
                set: ReferenceSet::Zone,
                id: 9,
            }
        );
    }

    #[tokio::test]
    async fn test_first_failing_field_is_reported() {
        let validator = validator(ValidationConfig::default()).await;
        let err = validator
            .resolve(
                EntityKind::PresentCar,
                [
                    ReferenceCheck::new("curr_zone_id", ReferenceSet::Zone, 1),
                    ReferenceCheck::new("last_zone_id", ReferenceSet::Zone, 42),
                    ReferenceCheck::new("camera_id", ReferenceSet::Camera, 7),
                ],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ReferenceError::InvalidReference { field: "last_zone_id", id: 42, .. }
        ));
    }

    #[tokio::test]
    async fn test_all_hits_pass_through_unchanged() {
        let validator = validator(ValidationConfig::default()).await;
        let resolved = validator
            .resolve(
                EntityKind::Zone,
                [ReferenceCheck::new("carpark_id", ReferenceSet::Carpark, 10)],
            )
            .unwrap();
        assert_eq!(resolved, [10]);
    }

    #[tokio::test]
    async fn test_membership_preconditions() {
        let validator = validator(ValidationConfig::default()).await;
        assert_eq!(
            validator.require_absent(ReferenceSet::Zone, 2),
            Err(ReferenceError::AlreadyExists {
                set: ReferenceSet::Zone,
                id: 2
            })
        );
        assert!(validator.require_absent(ReferenceSet::Zone, 4).is_ok());
        assert!(validator.require_member(ReferenceSet::Carpark, 10).is_ok());
        assert_eq!(
            validator.require_member(ReferenceSet::Carpark, 11),
            Err(ReferenceError::NotMember {
                set: ReferenceSet::Carpark,
                id: 11
            })
        );
    }
}
