//! Sales Orders API Library
//!
//! This crate provides the core functionality for the Sales Orders API:
//! reference data lookups (clients, items), sales order CRUD with
//! server-side amount calculation, and an OpenAPI document for the
//! whole surface.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod pricing;
pub mod request_id;
pub mod services;
pub mod validation;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Everything served under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Service status endpoints
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        // Reference data used by the order form
        .route("/clients", get(handlers::clients::list_clients))
        .route("/clients/:id", get(handlers::clients::get_client))
        .route("/items", get(handlers::items::list_items))
        .route("/items/:id", get(handlers::items::get_item))
        // Sales orders
        .route(
            "/orders",
            get(handlers::orders::list_orders).post(handlers::orders::create_order),
        )
        .route("/orders/preview", post(handlers::orders::preview_order))
        .route(
            "/orders/:id",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
}

/// Assembles the application router: API routes, Swagger UI, and the
/// request id plumbing every error response depends on. Transport
/// layers (CORS, compression, timeouts) are applied by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(openapi::swagger_ui())
        .nest("/api", api_routes())
        .layer(request_id::trace_layer())
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

/// API status endpoint showing version and build information
async fn api_status(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_time = option_env!("BUILD_TIME").unwrap_or("unknown");

    Json(json!({
        "status": "ok",
        "service": "sales-orders-api",
        "version": version,
        "git_hash": git_hash,
        "build_time": build_time,
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Health check endpoint that verifies database connectivity
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.db.ping().await {
        Ok(()) => "healthy",
        Err(_) => "unhealthy",
    };
    let status = if database == "healthy" { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "checks": {
            "database": database,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
