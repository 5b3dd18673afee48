//! Domain models
//!
//! Per-entity records and their create/update requests live in the submodules.
//! This module holds the vocabulary shared by the store, the reference cache
//! and the lifecycle guard.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub mod camera;
pub mod carpark;
pub mod client;
pub mod present_car;
pub mod sign;
pub mod user;
pub mod zone;
pub mod zone_image;

pub use camera::{Camera, CameraCreateRequest, CameraUpdateRequest};
pub use carpark::{Carpark, CarparkCreateRequest, CarparkUpdateRequest};
pub use client::{ClientCredential, ClientCredentialCreateRequest, ClientCredentialUpdateRequest};
pub use present_car::{PresentCar, PresentCarCreateRequest, PresentCarUpdateRequest};
pub use sign::{Sign, SignCreateRequest, SignUpdateRequest};
pub use user::{User, UserCreateRequest, UserUpdateRequest};
pub use zone::{Zone, ZoneCreateRequest, ZoneUpdateRequest};
pub use zone_image::{ZoneImage, ZoneImageCreateRequest, ZoneImageUpdateRequest};

/// Id written into a reference field when its value is coerced instead of rejected
pub const UNASSIGNED_ID: i32 = 0;

/// Every persisted entity type this crate manages
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum EntityKind {
    Carpark,
    Zone,
    Camera,
    Sign,
    Client,
    User,
    PresentCar,
    ZoneImage,
}

impl EntityKind {
    /// Whether rows of this kind carry the `(is_enabled, is_deleted)` pair
    pub fn has_lifecycle(&self) -> bool {
        matches!(
            self,
            EntityKind::Zone
                | EntityKind::Camera
                | EntityKind::Sign
                | EntityKind::Client
                | EntityKind::User
        )
    }

    /// The reference set this kind feeds, if any
    pub fn reference_set(&self) -> Option<ReferenceSet> {
        match self {
            EntityKind::Zone => Some(ReferenceSet::Zone),
            EntityKind::Carpark => Some(ReferenceSet::Carpark),
            EntityKind::Camera => Some(ReferenceSet::Camera),
            _ => None,
        }
    }

    /// Table backing this kind
    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::Carpark => "carpark",
            EntityKind::Zone => "zone",
            EntityKind::Camera => "camera",
            EntityKind::Sign => "sign",
            EntityKind::Client => "api_key",
            EntityKind::User => "user",
            EntityKind::PresentCar => "presentcar",
            EntityKind::ZoneImage => "zone_images",
        }
    }
}

/// Natural key of a row: numeric for most tables, textual for clients and users
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    Int(i32),
    Text(String),
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKey::Int(id) => write!(f, "{id}"),
            EntityKey::Text(key) => write!(f, "{key}"),
        }
    }
}

impl From<i32> for EntityKey {
    fn from(id: i32) -> Self {
        EntityKey::Int(id)
    }
}

impl From<String> for EntityKey {
    fn from(key: String) -> Self {
        EntityKey::Text(key)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        EntityKey::Text(key.to_string())
    }
}

impl From<&EntityKey> for sea_orm::Value {
    fn from(key: &EntityKey) -> Self {
        match key {
            EntityKey::Int(id) => (*id).into(),
            EntityKey::Text(key) => key.clone().into(),
        }
    }
}

/// The persisted `(is_enabled, is_deleted)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifecycleState {
    pub is_enabled: bool,
    pub is_deleted: bool,
}

/// Coarse phase derived from a [`LifecycleState`]
///
/// A freshly created row is `(false, false)`, i.e. `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LifecyclePhase {
    Disabled,
    Enabled,
    Deleted,
}

impl LifecycleState {
    /// State assigned to every newly inserted row
    pub const CREATED: LifecycleState = LifecycleState {
        is_enabled: false,
        is_deleted: false,
    };

    pub fn new(is_enabled: bool, is_deleted: bool) -> Self {
        Self { is_enabled, is_deleted }
    }

    pub fn phase(&self) -> LifecyclePhase {
        if self.is_deleted {
            LifecyclePhase::Deleted
        } else if self.is_enabled {
            LifecyclePhase::Enabled
        } else {
            LifecyclePhase::Disabled
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_deleted
    }
}

/// Named in-memory sets of currently valid identifiers
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReferenceSet {
    Zone,
    Carpark,
    Camera,
}

impl ReferenceSet {
    /// Entity kind whose active identifiers populate this set
    pub fn source_kind(&self) -> EntityKind {
        match self {
            ReferenceSet::Zone => EntityKind::Zone,
            ReferenceSet::Carpark => EntityKind::Carpark,
            ReferenceSet::Camera => EntityKind::Camera,
        }
    }
}

/// How a dependent write treats a reference that is not in its set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ReferencePolicy {
    /// Fail the whole write with the first failing field
    #[serde(rename = "reject")]
    #[strum(serialize = "reject")]
    Reject,
    /// Replace the failing value with [`UNASSIGNED_ID`] and continue
    #[serde(rename = "coerce")]
    #[strum(serialize = "coerce")]
    CoerceToUnassigned,
}
