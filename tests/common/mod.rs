#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use dosa_server::backend::database::DatabaseBackendConfig;
use dosa_server::backend::{BackendFactory, StoreBackend};
use dosa_server::config::{ApiConfig, AppConfig, DatabaseConfig};
use dosa_server::startup::build_router;
use serde_json::{json, Value};
use std::sync::Arc;

/// Default configuration pointed at an in-memory database
pub fn create_test_app_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Configuration that turns zero-row updates and deletes into 404s
pub fn create_strict_app_config() -> AppConfig {
    AppConfig {
        api: ApiConfig {
            strict_writes: true,
        },
        ..create_test_app_config()
    }
}

/// Configuration with SQLite foreign key enforcement switched on
pub fn create_foreign_key_app_config() -> AppConfig {
    let mut config = create_test_app_config();
    config.database.foreign_keys = true;
    config
}

/// Create an in-memory backend with the tables created
pub async fn setup_test_database(
    app_config: &AppConfig,
) -> Result<Arc<dyn StoreBackend>, Box<dyn std::error::Error>> {
    let backend_config =
        DatabaseBackendConfig::memory_sqlite().with_foreign_keys(app_config.database.foreign_keys);

    let backend = BackendFactory::create(&backend_config).await?;
    backend.init_schema().await?;

    Ok(backend)
}

/// Create a test app with an in-memory database and the given configuration
pub async fn setup_test_app(
    app_config: AppConfig,
) -> Result<(Router, Arc<dyn StoreBackend>), Box<dyn std::error::Error>> {
    let backend = setup_test_database(&app_config).await?;
    let app = build_router(backend.clone(), Arc::new(app_config));
    Ok((app, backend))
}

pub async fn setup_test_server() -> TestServer {
    setup_server_with(create_test_app_config()).await
}

pub async fn setup_server_with(app_config: AppConfig) -> TestServer {
    let (app, _) = setup_test_app(app_config).await.unwrap();
    TestServer::new(app).unwrap()
}

pub async fn create_customer(server: &TestServer, name: &str, phone: &str) -> Value {
    let response = server
        .post("/customers")
        .json(&json!({ "name": name, "phone": phone }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

pub async fn create_item(server: &TestServer, name: &str, price: f64) -> Value {
    let response = server
        .post("/items")
        .json(&json!({ "name": name, "price": price }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

pub async fn create_order(
    server: &TestServer,
    customer_id: i64,
    item_id: i64,
    quantity: i64,
) -> Value {
    let response = server
        .post("/orders")
        .json(&json!({
            "customer_id": customer_id,
            "item_id": item_id,
            "quantity": quantity
        }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    response.json()
}

/// Assert the error body shape and category
pub fn assert_error(body: &Value, category: &str, status: &str) {
    assert_eq!(body["error"], category, "unexpected error body: {}", body);
    assert_eq!(body["status"], status);
    assert!(body["detail"].is_string());
}
