//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data and delegate to `auth::service`;
//! protected handlers receive the current user from the middleware.

use crate::auth::models::{LoginForm, OwnedItem, TokenResponse};
use crate::auth::service::AuthService;
use crate::database::models::{User, UserInfo};
use crate::errors::ServiceError;
use axum::{
    extract::{Extension, Form},
    response::Json,
};
use std::sync::Arc;

/// Handle OAuth2 password-grant login
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let response = auth_service.login(form).await?;
    Ok(Json(response))
}

/// Get current user information
#[axum::debug_handler]
pub async fn me(Extension(user): Extension<User>) -> Json<UserInfo> {
    Json(UserInfo::from(&user))
}

/// List the items owned by the current user
#[axum::debug_handler]
pub async fn my_items(Extension(user): Extension<User>) -> Json<Vec<OwnedItem>> {
    Json(vec![OwnedItem {
        item_id: "Foo".to_string(),
        owner: user.username,
    }])
}
