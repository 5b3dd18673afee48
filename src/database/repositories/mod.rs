//! SeaORM repository implementations
//!
//! One repository per table. Repositories read and write records; lifecycle
//! transitions go through `crate::store` instead, so that every state change
//! is a conditional write.

pub mod traits;
pub mod camera;
pub mod carpark;
pub mod client;
pub mod present_car;
pub mod sign;
pub mod user;
pub mod zone;
pub mod zone_image;

// Re-export for convenience
pub use camera::CameraSeaOrmRepository;
pub use carpark::CarparkSeaOrmRepository;
pub use client::ClientSeaOrmRepository;
pub use present_car::PresentCarSeaOrmRepository;
pub use sign::SignSeaOrmRepository;
pub use traits::{LifecycleEntity, LifecycleFilter};
pub use user::UserSeaOrmRepository;
pub use zone::ZoneSeaOrmRepository;
pub use zone_image::ZoneImageSeaOrmRepository;
