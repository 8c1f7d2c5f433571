use axum::{middleware, routing::get, Router};
use std::path::Path;
use std::sync::Arc;

use crate::backend::database::loader::parse_document;
use crate::backend::{BackendFactory, StoreBackend};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::ImportSummary;
use crate::{logging, resource};

/// Connect to the configured store and make sure the tables exist
pub async fn setup_backend(config: &AppConfig) -> AppResult<Arc<dyn StoreBackend>> {
    let backend = BackendFactory::create(&config.database.to_backend_config()).await?;
    backend.init_schema().await?;
    Ok(backend)
}

/// Build the HTTP router over an injected backend
pub fn build_router(backend: Arc<dyn StoreBackend>, config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(resource::service::root))
        .route("/health", get(resource::service::health))
        .route(
            "/customers",
            get(resource::customer::list_customers).post(resource::customer::create_customer),
        )
        .route(
            "/customers/{id}",
            get(resource::customer::get_customer)
                .put(resource::customer::update_customer)
                .delete(resource::customer::delete_customer),
        )
        .route(
            "/items",
            get(resource::item::list_items).post(resource::item::create_item),
        )
        .route(
            "/items/{id}",
            get(resource::item::get_item)
                .put(resource::item::update_item)
                .delete(resource::item::delete_item),
        )
        .route(
            "/orders",
            get(resource::order::list_orders).post(resource::order::create_order),
        )
        .route(
            "/orders/{id}",
            get(resource::order::get_order)
                .put(resource::order::update_order)
                .delete(resource::order::delete_order),
        )
        .layer(middleware::from_fn(logging::logging_middleware))
        .with_state((backend, config))
}

/// Drop and recreate the schema, then load the document at `path`
pub async fn run_bulk_load(
    backend: &dyn StoreBackend,
    path: impl AsRef<Path>,
) -> AppResult<ImportSummary> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;

    load_document(backend, &content).await
}

/// Drop and recreate the schema, then load an in-memory document
pub async fn load_document(backend: &dyn StoreBackend, content: &str) -> AppResult<ImportSummary> {
    let groups = parse_document(content)?;

    backend.reset_schema().await?;
    backend.import_orders(&groups).await
}
