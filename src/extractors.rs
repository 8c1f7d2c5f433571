use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, Request,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections use the service's error body
///
/// Missing fields, wrong types and malformed JSON all surface as validation
/// errors rather than axum's plain-text rejections.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiJsonRejection(rejection)),
        }
    }
}

pub struct ApiJsonRejection(pub JsonRejection);

impl IntoResponse for ApiJsonRejection {
    fn into_response(self) -> Response {
        AppError::Validation(format!("Invalid request body: {}", self.0.body_text()))
            .into_response()
    }
}

/// Map a path rejection (e.g. a non-integer id) to a validation error
pub fn path_error(rejection: PathRejection) -> AppError {
    AppError::Validation(format!("Invalid path parameter: {}", rejection.body_text()))
}

/// Map a query string rejection to a validation error
pub fn query_error(rejection: QueryRejection) -> AppError {
    AppError::Validation(format!("Invalid query parameter: {}", rejection.body_text()))
}
