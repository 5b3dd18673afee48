//! Reference cache and validation against a real store

mod common;

use fyc_registry::{
    database::repositories::LifecycleFilter,
    errors::{AppError, ReferenceError},
    models::{
        PresentCarCreateRequest, PresentCarUpdateRequest, ReferenceSet, SignCreateRequest,
        UNASSIGNED_ID, ZoneImageCreateRequest,
    },
};

use common::{camera_request, carpark_request, seed_zones, setup, zone_request};

fn sighting(camera_id: i32, curr_zone_id: i32, last_zone_id: i32) -> PresentCarCreateRequest {
    PresentCarCreateRequest {
        car_details_id: 0,
        camera_id,
        confidence: 92,
        curr_zone_id,
        last_zone_id,
        direction: "in".to_string(),
        lpn: "AB12CDE".to_string(),
        transaction_date: None,
        extra: None,
    }
}

#[tokio::test]
async fn test_cache_tracks_writes() {
    let (_db, registry) = setup().await;
    let cache = &registry.cache;
    assert!(cache.snapshot(ReferenceSet::Zone).is_empty());

    let carpark_id = seed_zones(&registry, 3).await;
    assert!(cache.contains(ReferenceSet::Carpark, carpark_id));
    assert_eq!(cache.snapshot(ReferenceSet::Zone).members(), vec![1, 2, 3]);

    // Disabled zones stay valid targets; only deletion removes them
    registry.zones.set_enabled(2, true).await.unwrap();
    registry.zones.set_enabled(2, false).await.unwrap();
    assert!(cache.contains(ReferenceSet::Zone, 2));

    registry.zones.delete(2).await.unwrap();
    assert_eq!(cache.snapshot(ReferenceSet::Zone).members(), vec![1, 3]);
    assert!(!cache.is_degraded());
}

#[tokio::test]
async fn test_camera_references_are_coerced() {
    let (_db, registry) = setup().await;
    seed_zones(&registry, 3).await;

    let outcome = registry.cameras.create(camera_request(2, 9)).await.unwrap();
    assert_eq!(outcome.record.zone_id_in, 2);
    assert_eq!(outcome.record.zone_id_out, UNASSIGNED_ID);
    assert!(outcome.cache_warning.is_none());
    assert!(registry.cache.contains(ReferenceSet::Camera, outcome.record.id));

    let sign = registry
        .signs
        .create(SignCreateRequest {
            sign_id: 10,
            sign_name: "Level 3 entrance".to_string(),
            sign_type: "led".to_string(),
            sign_ip: "10.0.0.40".to_string(),
            sign_port: 9100,
            zone_id: 7,
        })
        .await
        .unwrap()
        .record;
    assert_eq!(sign.zone_id, UNASSIGNED_ID);
}

#[tokio::test]
async fn test_deleted_zone_rejects_dependents() {
    let (_db, registry) = setup().await;
    seed_zones(&registry, 5).await;
    let camera = registry.cameras.create(camera_request(1, 5)).await.unwrap().record;
    assert_eq!(camera.zone_id_out, 5);

    registry.zones.delete(5).await.unwrap();
    assert!(!registry.cache.contains(ReferenceSet::Zone, 5));

    let err = registry
        .present_cars
        .create(sighting(camera.id, 5, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference {
            field: "curr_zone_id",
            set: ReferenceSet::Zone,
            id: 5,
        })
    ));

    let coerced = registry.cameras.create(camera_request(5, 1)).await.unwrap().record;
    assert_eq!(coerced.zone_id_in, UNASSIGNED_ID);

    let err = registry
        .zone_images
        .create(ZoneImageCreateRequest {
            zone_id: 5,
            lang: "en".to_string(),
            image_sm: "small".to_string(),
            image_lg: "large".to_string(),
            extra: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference { field: "zone_id", .. })
    ));
}

#[tokio::test]
async fn test_sighting_reports_first_failing_field() {
    let (_db, registry) = setup().await;
    seed_zones(&registry, 2).await;
    let camera = registry.cameras.create(camera_request(1, 2)).await.unwrap().record;

    let car = registry
        .present_cars
        .create(sighting(camera.id, 2, 1))
        .await
        .unwrap()
        .record;
    let found = registry.present_cars.find_by_lpn("AB12CDE").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, car.id);
    assert_eq!(found[0].camera_id, camera.id);

    let err = registry
        .present_cars
        .create(sighting(camera.id + 100, 2, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference {
            field: "camera_id",
            set: ReferenceSet::Camera,
            ..
        })
    ));

    let err = registry
        .present_cars
        .create(sighting(camera.id, 2, 8))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference { field: "last_zone_id", .. })
    ));
}

fn moved_to(camera_id: i32, curr_zone_id: i32, last_zone_id: i32) -> PresentCarUpdateRequest {
    PresentCarUpdateRequest {
        camera_id,
        confidence: 97,
        curr_zone_id,
        last_zone_id,
        direction: "in".to_string(),
        lpn: "AB12CDE".to_string(),
        extra: None,
    }
}

#[tokio::test]
async fn test_sightings_update_by_plate() {
    let (_db, registry) = setup().await;
    seed_zones(&registry, 3).await;
    let camera = registry.cameras.create(camera_request(1, 2)).await.unwrap().record;

    for _ in 0..2 {
        registry
            .present_cars
            .create(sighting(camera.id, 1, 1))
            .await
            .unwrap();
    }

    let moved = registry
        .present_cars
        .update_by_lpn("AB12CDE", moved_to(camera.id, 3, 1))
        .await
        .unwrap();
    assert_eq!(moved.len(), 2);
    assert!(moved.iter().all(|car| car.curr_zone_id == 3 && car.confidence == 97));

    // Same reject policy as create: nothing changes on an unknown zone
    let err = registry
        .present_cars
        .update_by_lpn("AB12CDE", moved_to(camera.id, 9, 3))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference { field: "curr_zone_id", .. })
    ));
    let unchanged = registry.present_cars.find_by_lpn("AB12CDE").await.unwrap();
    assert!(unchanged.iter().all(|car| car.curr_zone_id == 3));

    let err = registry
        .present_cars
        .update_by_lpn("ZZ00ZZZ", moved_to(camera.id, 2, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_zone_create_checks_duplicates_and_carpark() {
    let (_db, registry) = setup().await;
    let carpark_id = seed_zones(&registry, 1).await;

    let err = registry
        .zones
        .create(zone_request(1, carpark_id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::AlreadyExists {
            set: ReferenceSet::Zone,
            id: 1
        })
    ));

    let err = registry
        .zones
        .create(zone_request(2, carpark_id + 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference { field: "carpark_id", .. })
    ));
    assert!(!registry.cache.contains(ReferenceSet::Zone, 2));
}

#[tokio::test]
async fn test_unassigned_zone_id_is_reserved() {
    let (_db, registry) = setup().await;
    let carpark_id = seed_zones(&registry, 1).await;

    let err = registry
        .zones
        .create(zone_request(UNASSIGNED_ID, carpark_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(!registry.cache.contains(ReferenceSet::Zone, UNASSIGNED_ID));

    // A coerced camera must not end up pointing at a real zone
    let camera = registry
        .cameras
        .create(camera_request(77, 88))
        .await
        .unwrap()
        .record;
    assert_eq!(camera.zone_id_in, UNASSIGNED_ID);
    assert_eq!(camera.zone_id_out, UNASSIGNED_ID);
    assert!(matches!(
        registry.zones.get(UNASSIGNED_ID).await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_carpark_delete_refreshes_set() {
    let (_db, registry) = setup().await;
    let carpark = registry
        .carparks
        .create(carpark_request("North"))
        .await
        .unwrap()
        .record;
    assert!(registry.cache.contains(ReferenceSet::Carpark, carpark.id));

    let outcome = registry.carparks.delete(carpark.id).await.unwrap();
    assert_eq!(outcome.rows_affected, 1);
    assert!(!registry.cache.contains(ReferenceSet::Carpark, carpark.id));

    let err = registry.carparks.delete(carpark.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = registry
        .zones
        .create(zone_request(1, carpark.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Reference(ReferenceError::InvalidReference { field: "carpark_id", .. })
    ));
}

#[tokio::test]
async fn test_listing_filters() {
    let (_db, registry) = setup().await;
    seed_zones(&registry, 3).await;
    registry.zones.set_enabled(1, true).await.unwrap();
    registry.zones.delete(3).await.unwrap();

    let ids = |zones: Vec<fyc_registry::models::Zone>| {
        let mut ids: Vec<i32> = zones.into_iter().map(|z| z.zone_id).collect();
        ids.sort_unstable();
        ids
    };

    assert_eq!(ids(registry.zones.list(LifecycleFilter::Active).await.unwrap()), vec![1, 2]);
    assert_eq!(ids(registry.zones.list(LifecycleFilter::Enabled).await.unwrap()), vec![1]);
    assert_eq!(ids(registry.zones.list(LifecycleFilter::Deleted).await.unwrap()), vec![3]);
}

#[tokio::test]
async fn test_load_all_advances_generations() {
    let (_db, registry) = setup().await;
    let before: Vec<u64> = registry.cache.health().iter().map(|h| h.generation).collect();
    assert!(before.iter().all(|g| *g == 1));

    registry.cache.load_all().await.unwrap();
    for health in registry.cache.health() {
        assert_eq!(health.generation, 2);
        assert!(health.refreshed_at.is_some());
        assert!(health.degraded.is_none());
    }
}
