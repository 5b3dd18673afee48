//! Service layer
//!
//! Services orchestrate every mutating request the same way:
//!
//! 1. dependent references are resolved against the reference cache,
//! 2. the record is written through its repository,
//! 3. lifecycle changes go through the [`LifecycleGuard`],
//! 4. the reference set backed by the written entity is refreshed.
//!
//! A failed refresh never fails the write; it is returned as a warning on the
//! outcome and the cache keeps its previous snapshot.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::database::repositories::{
    CameraSeaOrmRepository, CarparkSeaOrmRepository, ClientSeaOrmRepository,
    PresentCarSeaOrmRepository, SignSeaOrmRepository, UserSeaOrmRepository,
    ZoneImageSeaOrmRepository, ZoneSeaOrmRepository,
};
use crate::models::ReferenceSet;
use crate::store::{EntityStore, SeaOrmEntityStore};

pub mod camera_service;
pub mod carpark_service;
pub mod client_service;
pub mod lifecycle;
pub mod present_car_service;
pub mod reference_cache;
pub mod sign_service;
pub mod user_service;
pub mod validation;
pub mod zone_image_service;
pub mod zone_service;

pub use camera_service::CameraService;
pub use carpark_service::CarparkService;
pub use client_service::ClientService;
pub use lifecycle::{DeleteOutcome, LifecycleGuard, Transition};
pub use present_car_service::PresentCarService;
pub use reference_cache::{ReferenceCache, SetHealth};
pub use sign_service::SignService;
pub use user_service::UserService;
pub use validation::{ReferenceCheck, Validator};
pub use zone_image_service::ZoneImageService;
pub use zone_service::ZoneService;

/// A persisted record plus any cache warning raised after the write
#[derive(Debug, Clone, Serialize)]
pub struct WriteOutcome<T> {
    pub record: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_warning: Option<String>,
}

impl<T> WriteOutcome<T> {
    pub fn new(record: T, cache_warning: Option<String>) -> Self {
        Self {
            record,
            cache_warning,
        }
    }
}

/// Refresh `set` after a committed write, turning failure into a warning
pub(crate) async fn refresh_after_write(
    cache: &ReferenceCache,
    set: ReferenceSet,
) -> Option<String> {
    cache.refresh(set).await.err().map(|e| e.to_string())
}

/// Every service, wired to one connection and one shared reference cache
#[derive(Clone)]
pub struct Registry {
    pub cache: Arc<ReferenceCache>,
    pub guard: Arc<LifecycleGuard>,
    pub validator: Arc<Validator>,
    pub carparks: Arc<CarparkService>,
    pub zones: Arc<ZoneService>,
    pub cameras: Arc<CameraService>,
    pub signs: Arc<SignService>,
    pub present_cars: Arc<PresentCarService>,
    pub zone_images: Arc<ZoneImageService>,
    pub clients: Arc<ClientService>,
    pub users: Arc<UserService>,
}

impl Registry {
    /// Build the services. The cache starts empty; call `cache.load_all()` before serving.
    pub fn new(connection: Arc<DatabaseConnection>, config: &Config) -> Self {
        let timeout = config.store.operation_timeout;
        let store: Arc<dyn EntityStore> = Arc::new(SeaOrmEntityStore::new(connection.clone()));
        let cache = Arc::new(ReferenceCache::new(
            store.clone(),
            config.cache.refresh_timeout,
        ));
        let guard = Arc::new(LifecycleGuard::new(store, cache.clone(), timeout));
        let validator = Arc::new(Validator::new(cache.clone(), config.validation.clone()));

        Self {
            carparks: Arc::new(CarparkService::new(
                CarparkSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                cache.clone(),
                timeout,
            )),
            zones: Arc::new(ZoneService::new(
                ZoneSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                guard.clone(),
                cache.clone(),
                timeout,
            )),
            cameras: Arc::new(CameraService::new(
                CameraSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                guard.clone(),
                cache.clone(),
                timeout,
            )),
            signs: Arc::new(SignService::new(
                SignSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                guard.clone(),
                timeout,
            )),
            present_cars: Arc::new(PresentCarService::new(
                PresentCarSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                timeout,
            )),
            zone_images: Arc::new(ZoneImageService::new(
                ZoneImageSeaOrmRepository::new(connection.clone()),
                validator.clone(),
                timeout,
            )),
            clients: Arc::new(ClientService::new(
                ClientSeaOrmRepository::new(connection.clone()),
                guard.clone(),
                timeout,
            )),
            users: Arc::new(UserService::new(
                UserSeaOrmRepository::new(connection),
                guard.clone(),
                timeout,
            )),
            cache,
            guard,
            validator,
        }
    }
}
