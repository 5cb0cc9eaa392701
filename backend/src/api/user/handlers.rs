//! Handler functions for user registration.

use super::models::{PublicUserView, RegistrationInput};
use crate::api::AppState;
use crate::api::common::{ApiError, ApiResponse, service_error_to_http};
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use serde_json::Value;

/// Registers a new user.
#[axum::debug_handler]
pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ApiResponse<PublicUserView>>), ApiError> {
    let input = RegistrationInput::from_json(payload).map_err(service_error_to_http)?;

    let user = state
        .registration
        .validate_and_create(input)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, "User created successfully")),
    ))
}
