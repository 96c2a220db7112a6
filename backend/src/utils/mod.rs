//! Cryptographic helpers: bcrypt password hashing and JWT handling.

pub mod jwt;
pub mod password;
