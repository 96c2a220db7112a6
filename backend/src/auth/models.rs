//! Data structures for the authentication flow.
//!
//! Login uses the OAuth2 password-grant form; responses use the standard
//! bearer token shape.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// OAuth2 password-grant login form (`application/x-www-form-urlencoded`).
///
/// Missing fields deserialize as empty so validation reports them.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// When present, must be `password`. Other OAuth2 fields (`scope`,
    /// `client_id`, `client_secret`) are accepted and ignored.
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Item owned by the current user.
#[derive(Debug, Serialize)]
pub struct OwnedItem {
    pub item_id: String,
    pub owner: String,
}
