//! Web handlers module
//!
//! Handlers are organized by entity. Each one binds its input, calls the
//! matching service on the shared [`crate::services::Registry`] and hands the
//! result to [`crate::web::responses::handle_result`].

use serde::Deserialize;

use crate::database::repositories::LifecycleFilter;

pub mod cameras;
pub mod carparks;
pub mod clients;
pub mod health;
pub mod present_cars;
pub mod signs;
pub mod users;
pub mod zone_images;
pub mod zones;

/// Body of `PUT .../state`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StateChangeRequest {
    pub enabled: bool,
}

/// `?filter=active|enabled|deleted` on lifecycle listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: LifecycleFilter,
}
