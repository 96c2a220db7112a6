//! Module for business logic services that sit above the repositories.

pub mod user_service;
