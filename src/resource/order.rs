use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};

use super::{created_response, not_found, write_acknowledgement, AppState, HandlerResult};
use crate::backend::database::OrderFilter;
use crate::extractors::{path_error, query_error, ApiJson};
use crate::models::{OrderInput, OrderListQuery};

// Orders are written without checking that the customer and item exist; only
// the store's own foreign key enforcement (when enabled) can reject them.
// `ApiJson<OrderInput>` is the whole body check: three integers, no range on quantity.
pub async fn create_order(
    State((backend, _)): State<AppState>,
    ApiJson(payload): ApiJson<OrderInput>,
) -> HandlerResult {
    let created = backend
        .create_order(&payload)
        .await
        .map_err(|e| e.to_response())?;

    created_response("orders", created.id, &created)
}

pub async fn get_order(
    State((backend, _)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    match backend.find_order_by_id(id).await {
        Ok(Some(order)) => Ok(Json(order).into_response()),
        Ok(None) => Err(not_found("Order")),
        Err(e) => Err(e.to_response()),
    }
}

pub async fn list_orders(
    State((backend, _)): State<AppState>,
    query: Result<Query<OrderListQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(params) = query.map_err(|e| query_error(e).to_response())?;

    let orders = backend
        .find_orders(&OrderFilter::from_query(&params))
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(orders).into_response())
}

pub async fn update_order(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ApiJson(payload): ApiJson<OrderInput>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    let outcome = backend
        .update_order(id, &payload)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Order", id, "updated")
}

pub async fn delete_order(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    let outcome = backend
        .delete_order(id)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Order", id, "deleted")
}
