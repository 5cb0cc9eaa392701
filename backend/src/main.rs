//! Main entry point for the user API backend.
//!
//! This file initializes the Axum web server, sets up the user store,
//! applies migrations and registers the user and authentication routes.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::AppState;
use crate::api::common::ApiResponse;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let store = Arc::new(UserService::new(db.pool().clone(), config.bcrypt_cost));
    let jwt = JwtUtils::new(&config.jwt_secret, config.jwt_expires_in_seconds);
    let app = router(AppState::new(store, jwt));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting user API server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Builds the application router around the shared state.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest(
            "/api/user",
            api::user::routes::user_router().merge(auth::routes::auth_router()),
        )
        .layer(Extension(state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "User API",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the user API",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    async fn server() -> TestServer {
        let store = Arc::new(UserService::new(test_pool().await, 4));
        let app = router(AppState::new(store, JwtUtils::new("test-secret", 3600)));
        TestServer::new(app).unwrap()
    }

    async fn register(server: &TestServer, email: &str, password: &str) {
        let response = server
            .post("/api/user/create")
            .json(&json!({"email": email, "password": password, "name": "A"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let server = server().await;
        let response = server.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["data"]["service"], "User API");
    }

    #[tokio::test]
    async fn test_create_user_returns_public_view() {
        let server = server().await;
        let response = server
            .post("/api/user/create")
            .json(&json!({"email": "a@b.com", "password": "abcde", "name": "A"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["data"], json!({"email": "a@b.com", "name": "A"}));
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn test_create_user_short_password() {
        let server = server().await;
        let response = server
            .post("/api/user/create")
            .json(&json!({"email": "a@b.com", "password": "abcd", "name": "A"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["error_type"], "validation_error");
        assert_eq!(body["error"]["details"][0]["field"], "password");
        assert_eq!(body["error"]["details"][0]["code"], "min_length");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let server = server().await;
        register(&server, "a@b.com", "abcde").await;

        let response = server
            .post("/api/user/create")
            .json(&json!({"email": "a@b.com", "password": "abcde", "name": "A"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["details"][0]["field"], "email");
        assert_eq!(body["error"]["details"][0]["code"], "unique");
    }

    #[tokio::test]
    async fn test_create_user_rejects_non_object() {
        let server = server().await;
        let response = server
            .post("/api/user/create")
            .json(&json!(["a@b.com"]))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"]["details"][0]["field"],
            "non_field_errors"
        );
    }

    #[tokio::test]
    async fn test_token_flow_and_profile() {
        let server = server().await;
        register(&server, "a@b.com", "abcde").await;

        let response = server
            .post("/api/user/token")
            .json(&json!({"email": "a@b.com", "password": "abcde"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<Value>();
        assert_eq!(body["data"]["expires_in"], 3600);
        let token = body["data"]["token"].as_str().unwrap().to_string();

        let response = server
            .get("/api/user/me")
            .authorization_bearer(token)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<Value>()["data"],
            json!({"email": "a@b.com", "name": "A"})
        );
    }

    #[tokio::test]
    async fn test_token_wrong_password() {
        let server = server().await;
        register(&server, "a@b.com", "abcde").await;

        let response = server
            .post("/api/user/token")
            .json(&json!({"email": "a@b.com", "password": "wrong"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["error_type"], "authorization");
        assert_eq!(
            body["message"],
            "Unable to authenticate with provided credentials"
        );
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_token_rejects_password_sharing_hash_prefix() {
        let server = server().await;
        let prefix = "a".repeat(72);
        register(&server, "a@b.com", &prefix).await;

        let response = server
            .post("/api/user/token")
            .json(&json!({"email": "a@b.com", "password": format!("{}WRONG", prefix)}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"]["error_type"],
            "authorization"
        );
    }

    #[tokio::test]
    async fn test_me_requires_valid_token() {
        let server = server().await;
        let response = server.get("/api/user/me").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .get("/api/user/me")
            .authorization_bearer("garbage")
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
