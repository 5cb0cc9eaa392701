//! Module for core business logic services.
//!
//! This module encapsulates the registration validator, the collaborator
//! interfaces it and the credential authenticator depend on, and the
//! SQLite-backed user store implementing them.

pub mod registration_service;
pub mod user_service;
pub mod user_store;
