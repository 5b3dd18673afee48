//! HTTP surface tests
//!
//! Drives the router through `axum-test` and checks the status mapping of
//! reference and lifecycle outcomes.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use fyc_registry::web::{AppState, WebServer};

async fn create_test_server() -> TestServer {
    let (database, registry) = common::setup().await;
    let state = AppState { database, registry };
    TestServer::new(WebServer::create_router(state)).unwrap()
}

async fn seed(server: &TestServer) -> i64 {
    let response = server
        .post("/api/v1/carparks")
        .json(&json!({"type": "surface", "name": "West", "capacity": 120}))
        .await;
    response.assert_status(StatusCode::CREATED);
    let carpark_id = response.json::<Value>()["data"]["record"]["id"]
        .as_i64()
        .unwrap();

    for zone_id in 1..=3 {
        server
            .post("/api/v1/zones")
            .json(&json!({
                "zone_id": zone_id,
                "carpark_id": carpark_id,
                "name": format!("Zone {zone_id}"),
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    carpark_id
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = create_test_server().await;

    let health: Value = server.get("/health").await.json();
    assert_eq!(health["success"], true);
    assert_eq!(health["data"]["status"], "healthy");
    assert_eq!(health["data"]["database"], "connected");

    let cache: Value = server.get("/health/cache").await.json();
    assert_eq!(cache["data"]["degraded"], false);
    assert_eq!(cache["data"]["sets"].as_array().unwrap().len(), 3);

    let refreshed = server.post("/api/v1/cache/refresh").await;
    refreshed.assert_status_ok();
    assert_eq!(refreshed.json::<Value>()["data"]["sets"][0]["generation"], 2);
}

#[tokio::test]
async fn test_zone_lifecycle_over_http() {
    let server = create_test_server().await;
    seed(&server).await;

    let enable = server
        .put("/api/v1/zones/1/state")
        .json(&json!({"enabled": true}))
        .await;
    enable.assert_status_ok();
    assert_eq!(enable.json::<Value>()["data"]["to"], "enabled");

    server
        .put("/api/v1/zones/1/state")
        .json(&json!({"enabled": true}))
        .await
        .assert_status(StatusCode::CONFLICT);

    let deleted = server.delete("/api/v1/zones/1").await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["data"]["rows_affected"], 1);

    let again = server.delete("/api/v1/zones/1").await;
    again.assert_status_ok();
    assert_eq!(again.json::<Value>()["data"]["rows_affected"], 0);

    let terminal = server
        .put("/api/v1/zones/1/state")
        .json(&json!({"enabled": false}))
        .await;
    terminal.assert_status(StatusCode::CONFLICT);
    assert_eq!(terminal.json::<Value>()["details"]["terminal"], "true");

    server
        .delete("/api/v1/zones/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let deleted: Value = server.get("/api/v1/zones?filter=deleted").await.json();
    assert_eq!(deleted["data"].as_array().unwrap().len(), 1);
    let active: Value = server.get("/api/v1/zones").await.json();
    assert_eq!(active["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_reference_failures_name_the_field() {
    let server = create_test_server().await;
    let carpark_id = seed(&server).await;

    let camera = server
        .post("/api/v1/cameras")
        .json(&json!({
            "cam_name": "exit",
            "cam_ip": "10.0.0.30",
            "zone_id_in": 2,
            "zone_id_out": 9,
        }))
        .await;
    camera.assert_status(StatusCode::CREATED);
    let camera: Value = camera.json();
    assert_eq!(camera["data"]["record"]["zone_id_in"], 2);
    assert_eq!(camera["data"]["record"]["zone_id_out"], 0);
    assert!(camera["data"]["record"].get("cam_password").is_none());
    let camera_id = camera["data"]["record"]["id"].as_i64().unwrap();

    let rejected = server
        .post("/api/v1/present-cars")
        .json(&json!({
            "camera_id": camera_id,
            "curr_zone_id": 7,
            "last_zone_id": 1,
            "lpn": "XY99ZZZ",
        }))
        .await;
    rejected.assert_status(StatusCode::NOT_FOUND);
    let body: Value = rejected.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["field"], "curr_zone_id");
    assert_eq!(body["details"]["set"], "zone");

    server
        .post("/api/v1/zones")
        .json(&json!({"zone_id": 2, "carpark_id": carpark_id, "name": "dup"}))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .post("/api/v1/zones")
        .json(&json!({"zone_id": 0, "carpark_id": carpark_id, "name": "reserved"}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .put("/api/v1/zones/42")
        .json(&json!({"carpark_id": carpark_id, "name": "ghost"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_credentials_over_http() {
    let server = create_test_server().await;

    let created = server
        .post("/api/v1/clients")
        .json(&json!({
            "client_name": "Barrier",
            "client_id": "barrier-1",
            "client_secret": "s3cret",
            "api_key": "k1"
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    assert!(created.json::<Value>()["data"].get("client_secret").is_none());

    server
        .post("/api/v1/clients")
        .json(&json!({
            "client_name": "Barrier copy",
            "client_id": "barrier-1",
            "client_secret": "other",
            "api_key": "k2"
        }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .put("/api/v1/clients/barrier-1/state")
        .json(&json!({"enabled": true}))
        .await
        .assert_status_ok();

    let enabled: Value = server.get("/api/v1/clients?filter=enabled").await.json();
    assert_eq!(enabled["data"][0]["client_id"], "barrier-1");

    server
        .delete("/api/v1/clients/barrier-1")
        .await
        .assert_status_ok();
    let fetched: Value = server.get("/api/v1/clients/barrier-1").await.json();
    assert_eq!(fetched["data"]["is_deleted"], true);

    server
        .get("/api/v1/clients/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_and_sighting_updates_over_http() {
    let server = create_test_server().await;
    seed(&server).await;

    server
        .post("/api/v1/users")
        .json(&json!({"username": "night-shift", "password": "pw", "role": "attendant"}))
        .await
        .assert_status(StatusCode::CREATED);

    let updated = server
        .put("/api/v1/users/night-shift")
        .json(&json!({"first_name": "Alex", "role": "supervisor"}))
        .await;
    updated.assert_status_ok();
    let body: Value = updated.json();
    assert_eq!(body["data"]["role"], "supervisor");
    assert!(body["data"].get("password").is_none());

    server
        .delete("/api/v1/users/night-shift")
        .await
        .assert_status_ok();
    server
        .put("/api/v1/users/night-shift")
        .json(&json!({"role": "manager"}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let camera: Value = server
        .post("/api/v1/cameras")
        .json(&json!({
            "cam_name": "ramp",
            "cam_ip": "10.0.0.31",
            "zone_id_in": 1,
            "zone_id_out": 2,
        }))
        .await
        .json();
    let camera_id = camera["data"]["record"]["id"].as_i64().unwrap();
    let sighting = json!({
        "camera_id": camera_id,
        "curr_zone_id": 2,
        "last_zone_id": 1,
        "lpn": "KL55MNO",
    });
    server
        .post("/api/v1/present-cars")
        .json(&sighting)
        .await
        .assert_status(StatusCode::CREATED);

    let moved = server
        .put("/api/v1/present-cars?lpn=KL55MNO")
        .json(&json!({
            "camera_id": camera_id,
            "curr_zone_id": 3,
            "last_zone_id": 2,
            "lpn": "KL55MNO",
        }))
        .await;
    moved.assert_status_ok();
    assert_eq!(moved.json::<Value>()["data"][0]["curr_zone_id"], 3);

    server
        .put("/api/v1/present-cars")
        .json(&sighting)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
