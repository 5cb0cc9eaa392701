//! Collection of general utility functions.
//!
//! Holds helpers shared by several domain modules: session token handling
//! and the field validation engine.

pub mod jwt;
pub mod validation;
