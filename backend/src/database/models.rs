//! Rust structs that represent the credential store's table mappings.
//!
//! `User` is the stored credential record and is never serialized to
//! clients; `UserInfo` is the public view returned by protected endpoints.

use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

/// Credential record owned by the credential store.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub hashed_password: String,
    pub disabled: bool,
}

/// User information exposed to authenticated clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

/// Administrative input for a new credential record, password still in clear.
#[derive(Debug, Clone, Validate)]
pub struct CreateNewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Username must be between 1-255 characters"
    ))]
    pub username: String,

    #[validate(length(max = 255, message = "Full name too long"))]
    pub full_name: Option<String>,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub disabled: bool,
}

impl User {
    pub fn is_active(&self) -> bool {
        !self.disabled
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            disabled: user.disabled,
        }
    }
}
