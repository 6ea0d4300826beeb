use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::core::error::ApiError;

pub async fn fallback_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route matched");
    ApiError::NotFound("Route").into_response()
}
