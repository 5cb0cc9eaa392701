//! Rust structs that represent database table mappings.
//!
//! These models define the structure of user records as they are stored in
//! and retrieved from the user store. They differ from the API-facing views,
//! which never carry the password hash.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A persisted user record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
}
