//! Persistence layer for the user store.

pub mod user_repository;
