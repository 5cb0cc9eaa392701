//! Defines the HTTP routes for user registration.

use super::handlers::create_user;
use axum::{Router, routing::post};

pub fn user_router() -> Router {
    Router::new().route("/create", post(create_user))
}
