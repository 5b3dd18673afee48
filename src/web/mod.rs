//! Web layer
//!
//! A thin axum surface over the service layer. Handlers bind the request,
//! call one service operation and wrap the result in an [`responses::ApiResponse`].

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::database::Database;
use crate::services::Registry;

pub mod handlers;
pub mod responses;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub registry: Registry,
}

pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, database: Database, registry: Registry) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;
        let state = AppState { database, registry };

        Ok(Self {
            app: Self::create_router(state),
            addr,
        })
    }

    /// Create the router with all routes and middleware
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health::health_check))
            .route("/health/cache", get(handlers::health::cache_health))
            .nest("/api/v1", Self::api_v1_routes())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn api_v1_routes() -> Router<AppState> {
        Router::new()
            .route("/cache/refresh", post(handlers::health::refresh_cache))
            // Carparks
            .route(
                "/carparks",
                get(handlers::carparks::list_carparks).post(handlers::carparks::create_carpark),
            )
            .route(
                "/carparks/{id}",
                get(handlers::carparks::get_carpark)
                    .put(handlers::carparks::update_carpark)
                    .delete(handlers::carparks::delete_carpark),
            )
            .route("/carparks/{id}/zones", get(handlers::zones::list_carpark_zones))
            // Zones
            .route(
                "/zones",
                get(handlers::zones::list_zones).post(handlers::zones::create_zone),
            )
            .route(
                "/zones/{zone_id}",
                get(handlers::zones::get_zone)
                    .put(handlers::zones::update_zone)
                    .delete(handlers::zones::delete_zone),
            )
            .route("/zones/{zone_id}/state", put(handlers::zones::set_zone_state))
            .route(
                "/zones/{zone_id}/images",
                get(handlers::zone_images::list_zone_images),
            )
            // Cameras
            .route(
                "/cameras",
                get(handlers::cameras::list_cameras).post(handlers::cameras::create_camera),
            )
            .route(
                "/cameras/{id}",
                get(handlers::cameras::get_camera)
                    .put(handlers::cameras::update_camera)
                    .delete(handlers::cameras::delete_camera),
            )
            .route("/cameras/{id}/state", put(handlers::cameras::set_camera_state))
            // Signs
            .route(
                "/signs",
                get(handlers::signs::list_signs).post(handlers::signs::create_sign),
            )
            .route(
                "/signs/{sign_id}",
                get(handlers::signs::get_sign)
                    .put(handlers::signs::update_sign)
                    .delete(handlers::signs::delete_sign),
            )
            .route("/signs/{sign_id}/state", put(handlers::signs::set_sign_state))
            // Present cars
            .route(
                "/present-cars",
                get(handlers::present_cars::list_present_cars)
                    .post(handlers::present_cars::create_present_car)
                    .put(handlers::present_cars::update_present_cars_by_lpn),
            )
            .route(
                "/present-cars/{id}",
                get(handlers::present_cars::get_present_car)
                    .put(handlers::present_cars::update_present_car)
                    .delete(handlers::present_cars::delete_present_car),
            )
            // Zone images
            .route("/zone-images", post(handlers::zone_images::create_zone_image))
            .route(
                "/zone-images/{id}",
                get(handlers::zone_images::get_zone_image)
                    .put(handlers::zone_images::update_zone_image)
                    .delete(handlers::zone_images::delete_zone_image),
            )
            // Client credentials
            .route(
                "/clients",
                get(handlers::clients::list_clients).post(handlers::clients::create_client),
            )
            .route(
                "/clients/{client_id}",
                get(handlers::clients::get_client)
                    .put(handlers::clients::update_client)
                    .delete(handlers::clients::delete_client),
            )
            .route(
                "/clients/{client_id}/state",
                put(handlers::clients::set_client_state),
            )
            // Users
            .route(
                "/users",
                get(handlers::users::list_users).post(handlers::users::create_user),
            )
            .route(
                "/users/{username}",
                get(handlers::users::get_user)
                    .put(handlers::users::update_user)
                    .delete(handlers::users::delete_user),
            )
            .route("/users/{username}/state", put(handlers::users::set_user_state))
    }

    /// Serve until SIGTERM or Ctrl+C, then drain in-flight requests
    pub async fn serve_with_shutdown(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.addr, e))?;
        info!("Listening on {}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
