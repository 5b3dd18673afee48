pub use super::api_key::Entity as ApiKeys;
pub use super::camera::Entity as Cameras;
pub use super::carpark::Entity as Carparks;
pub use super::present_car::Entity as PresentCars;
pub use super::sign::Entity as Signs;
pub use super::user::Entity as Users;
pub use super::zone::Entity as Zones;
pub use super::zone_image::Entity as ZoneImages;
