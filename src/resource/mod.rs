pub mod customer;
pub mod item;
pub mod order;
pub mod service;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::backend::{StoreBackend, WriteOutcome};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::Acknowledgement;

/// Shared handler state: the injected store and the loaded configuration
pub type AppState = (Arc<dyn StoreBackend>, Arc<AppConfig>);

pub type HandlerResult = Result<Response, (StatusCode, Json<serde_json::Value>)>;

/// 201 response carrying the created record and its `Location`
pub(crate) fn created_response<T: Serialize>(
    collection: &str,
    id: i64,
    record: &T,
) -> HandlerResult {
    let location = format!("/{}/{}", collection, id);
    let location = HeaderValue::from_str(&location)
        .map_err(|_| AppError::Internal("Invalid location header".to_string()).to_response())?;

    let mut response = (StatusCode::CREATED, Json(record)).into_response();
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Acknowledge an update or delete.
///
/// A write that matched no row is still acknowledged unless `strict_writes` is on.
pub(crate) fn write_acknowledgement(
    config: &AppConfig,
    outcome: WriteOutcome,
    entity: &str,
    id: i64,
    verb: &str,
) -> HandlerResult {
    if outcome.is_no_match() {
        tracing::debug!(entity, id, verb, "write matched no rows");
        if config.api.strict_writes {
            return Err(AppError::NotFound(format!("{} not found", entity)).to_response());
        }
    }

    let ack = Acknowledgement::new(format!("{} {} successfully", entity, verb));
    Ok(Json(ack).into_response())
}

pub(crate) fn not_found(entity: &str) -> (StatusCode, Json<serde_json::Value>) {
    AppError::NotFound(format!("{} not found", entity)).to_response()
}
