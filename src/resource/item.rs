use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};

use super::{created_response, not_found, write_acknowledgement, AppState, HandlerResult};
use crate::backend::database::ItemFilter;
use crate::extractors::{path_error, query_error, ApiJson};
use crate::models::{ItemInput, ItemListQuery};
use crate::schema::validate_item;

pub async fn create_item(
    State((backend, _)): State<AppState>,
    ApiJson(payload): ApiJson<ItemInput>,
) -> HandlerResult {
    validate_item(&payload).map_err(|e| e.to_response())?;

    let created = backend
        .create_item(&payload)
        .await
        .map_err(|e| e.to_response())?;

    created_response("items", created.id, &created)
}

pub async fn get_item(
    State((backend, _)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    match backend.find_item_by_id(id).await {
        Ok(Some(item)) => Ok(Json(item).into_response()),
        Ok(None) => Err(not_found("Item")),
        Err(e) => Err(e.to_response()),
    }
}

/// `GET /items?name=`; no limit, the whole table when unfiltered
pub async fn list_items(
    State((backend, _)): State<AppState>,
    query: Result<Query<ItemListQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(params) = query.map_err(|e| query_error(e).to_response())?;

    let items = backend
        .find_items(&ItemFilter::from_query(&params))
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(items).into_response())
}

pub async fn update_item(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ApiJson(payload): ApiJson<ItemInput>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;
    validate_item(&payload).map_err(|e| e.to_response())?;

    let outcome = backend
        .update_item(id, &payload)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Item", id, "updated")
}

pub async fn delete_item(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    let outcome = backend
        .delete_item(id)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Item", id, "deleted")
}
