use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use rust_decimal::Decimal;
use sales_orders_api::{
    config::AppConfig,
    db,
    entities::{client, item},
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

/// Helper harness for spinning up an application backed by an in-memory
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // A single pooled connection keeps every query on the same
        // in-memory database; extra connections would each get their own.
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()));

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = sales_orders_api::app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    /// Like `request`, with extra request headers.
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize test request body"))
            }
            None => Body::empty(),
        };

        let request = builder.body(body).expect("build test request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("route test request")
    }

    /// Insert a client row for tests to reference.
    pub async fn seed_client(&self, name: &str) -> client::Model {
        client::ActiveModel {
            name: Set(name.to_string()),
            address1: Set(Some(format!("1 {} Street", name))),
            address2: Set(None),
            address3: Set(None),
            suburb: Set(Some("Richmond".to_string())),
            state: Set(Some("VIC".to_string())),
            post_code: Set(Some("3121".to_string())),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed client for tests")
    }

    /// Insert a catalog item row for tests to reference.
    pub async fn seed_item(&self, code: &str, price: Decimal) -> item::Model {
        item::ActiveModel {
            code: Set(code.to_string()),
            description: Set(format!("Test item {}", code)),
            price: Set(price),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed item for tests")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}
