//! Authentication module: credential verification, bearer-token issuance
//! and current-user resolution.
//!
//! This module provides the login endpoint, the protected user endpoints
//! and the middleware that guards them.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
