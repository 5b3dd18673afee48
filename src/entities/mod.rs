//! SeaORM table mappings
//!
//! None of these tables declare foreign keys. Referential integrity between
//! zones, carparks, cameras and their dependents is enforced by the reference
//! cache in `services::reference_cache`.

pub mod prelude;

pub mod api_key;
pub mod camera;
pub mod carpark;
pub mod present_car;
pub mod sign;
pub mod user;
pub mod zone;
pub mod zone_image;
