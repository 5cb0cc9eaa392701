//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle token issuance and the current-user profile. They are
//! merged into the user router under `/api/user`.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/token", post(create_token))
        .route("/me", get(me).layer(middleware::from_fn(jwt_auth)))
}
