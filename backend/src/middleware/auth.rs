//! Authorization middleware
//!
//! Header-based API key gate. Every protected route passes through this
//! check; handlers and services never inspect credentials themselves.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{ErrorDetail, ErrorResponse};
use crate::AppState;

const API_KEY_HEADER: &str = "x-api-key";

/// Authorization middleware that validates the API key header against the
/// configured key set.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    let key = match provided {
        Some(key) if !key.is_empty() => key,
        _ => return unauthorized_response("Missing API key header"),
    };

    if !state.config.auth.api_keys.iter().any(|k| k == key) {
        return unauthorized_response("Invalid API key");
    }

    next.run(request).await
}

/// Build a 401 response with the standard error body
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            field: None,
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
