//! Handler functions for authentication-related API endpoints.
//!
//! These functions process incoming HTTP requests for token issuance and the
//! current-user profile. Credential checks are delegated to
//! `auth::service`; token minting happens here, after validation succeeds.

use crate::api::AppState;
use crate::api::common::{ApiError, ApiResponse, service_error_to_http};
use crate::api::user::models::PublicUserView;
use crate::auth::models::*;
use crate::errors::ServiceError;
use crate::utils::jwt::Claims;
use axum::{
    extract::{Extension, Json},
    http::HeaderMap,
};
use serde_json::Value;

/// Handle token request
#[axum::debug_handler]
pub async fn create_token(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let context = RequestContext::from_headers(&headers);
    let request = AuthRequest::from_json(payload, context).map_err(service_error_to_http)?;

    let validated = state
        .credentials
        .authenticate(request)
        .await
        .map_err(service_error_to_http)?;

    let token = state
        .jwt
        .generate_token(&validated.user)
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(
        TokenResponse {
            token,
            expires_in: state.jwt.expires_in(),
        },
        "Token issued successfully",
    )))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<PublicUserView>>, ApiError> {
    let user = state
        .users
        .find_by_id(claims.user_id())
        .await
        .map_err(service_error_to_http)?
        .ok_or_else(|| service_error_to_http(ServiceError::not_found("User", claims.user_id())))?;

    Ok(Json(ApiResponse::success(
        PublicUserView::from(user),
        "User retrieved successfully",
    )))
}
