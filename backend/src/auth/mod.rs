//! Authentication module for credential validation and session tokens.
//!
//! This module provides the public interface for authentication-related
//! functionality: the credential authenticator, token issuance endpoints and
//! the authorization middleware.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
