use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};

use super::{created_response, not_found, write_acknowledgement, AppState, HandlerResult};
use crate::backend::database::CustomerFilter;
use crate::extractors::{path_error, query_error, ApiJson};
use crate::models::{CustomerInput, CustomerListQuery};
use crate::schema::{resolve_customer_limit, validate_customer};

pub async fn create_customer(
    State((backend, _)): State<AppState>,
    ApiJson(payload): ApiJson<CustomerInput>,
) -> HandlerResult {
    validate_customer(&payload).map_err(|e| e.to_response())?;

    let created = backend
        .create_customer(&payload)
        .await
        .map_err(|e| e.to_response())?;

    created_response("customers", created.id, &created)
}

pub async fn get_customer(
    State((backend, _)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    match backend.find_customer_by_id(id).await {
        Ok(Some(customer)) => Ok(Json(customer).into_response()),
        Ok(None) => Err(not_found("Customer")),
        Err(e) => Err(e.to_response()),
    }
}

/// `GET /customers?limit=&name=&phone=`; `limit` defaults to 10 and must be in 1..=100
pub async fn list_customers(
    State((backend, _)): State<AppState>,
    query: Result<Query<CustomerListQuery>, QueryRejection>,
) -> HandlerResult {
    let Query(params) = query.map_err(|e| query_error(e).to_response())?;
    let limit = resolve_customer_limit(&params).map_err(|e| e.to_response())?;

    let customers = backend
        .find_customers(&CustomerFilter::from_query(&params, limit))
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(customers).into_response())
}

pub async fn update_customer(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    ApiJson(payload): ApiJson<CustomerInput>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;
    validate_customer(&payload).map_err(|e| e.to_response())?;

    let outcome = backend
        .update_customer(id, &payload)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Customer", id, "updated")
}

pub async fn delete_customer(
    State((backend, config)): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> HandlerResult {
    let Path(id) = path.map_err(|e| path_error(e).to_response())?;

    let outcome = backend
        .delete_customer(id)
        .await
        .map_err(|e| e.to_response())?;

    write_acknowledgement(&config, outcome, "Customer", id, "deleted")
}
