//! Shared fixtures for the integration suites

#![allow(dead_code)]

use fyc_registry::{
    config::Config,
    database::Database,
    models::{CameraCreateRequest, CameraUpdateRequest, CarparkCreateRequest, ZoneCreateRequest},
    services::Registry,
};

/// In-memory database with migrations applied and a registry over it
pub async fn setup() -> (Database, Registry) {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.database.max_connections = Some(1);

    let database = Database::new(&config.database)
        .await
        .expect("Failed to create test database");
    database.migrate().await.expect("Failed to run migrations");

    let registry = Registry::new(database.connection(), &config);
    registry.cache.load_all().await.expect("Failed to load cache");
    (database, registry)
}

pub fn carpark_request(name: &str) -> CarparkCreateRequest {
    CarparkCreateRequest {
        carpark_type: "multi-storey".to_string(),
        name: name.to_string(),
        capacity: 300,
        language: None,
        extra: None,
    }
}

pub fn zone_request(zone_id: i32, carpark_id: i32) -> ZoneCreateRequest {
    ZoneCreateRequest {
        zone_id,
        carpark_id,
        name: format!("Level {zone_id}"),
        max_capacity: 100,
        free_capacity: 100,
        extra: None,
    }
}

pub fn camera_request(zone_id_in: i32, zone_id_out: i32) -> CameraCreateRequest {
    CameraCreateRequest {
        cam_name: "entry-lpr".to_string(),
        cam_type: "lpr".to_string(),
        cam_ip: "10.0.0.21".to_string(),
        cam_port: 554,
        cam_user: "admin".to_string(),
        cam_password: "secret".to_string(),
        zone_id_in,
        zone_id_out,
        direction: "in".to_string(),
        extra: None,
    }
}

/// One carpark with zones `1..=zones`; returns the carpark id
pub async fn seed_zones(registry: &Registry, zones: i32) -> i32 {
    let carpark = registry
        .carparks
        .create(carpark_request("Central"))
        .await
        .expect("Failed to create carpark")
        .record;
    for zone_id in 1..=zones {
        registry
            .zones
            .create(zone_request(zone_id, carpark.id))
            .await
            .expect("Failed to create zone");
    }
    carpark.id
}

pub fn camera_update_request(zone_id_in: i32, zone_id_out: i32) -> CameraUpdateRequest {
    let create = camera_request(zone_id_in, zone_id_out);
    CameraUpdateRequest {
        cam_name: create.cam_name,
        cam_type: create.cam_type,
        cam_ip: create.cam_ip,
        cam_port: create.cam_port,
        cam_user: create.cam_user,
        cam_password: create.cam_password,
        zone_id_in: create.zone_id_in,
        zone_id_out: create.zone_id_out,
        direction: create.direction,
        extra: None,
    }
}
