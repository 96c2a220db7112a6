//! Middleware for protecting authenticated routes.
//!
//! `jwt_auth` turns the bearer token into the current active `User` and
//! stores it in the request extensions. Handlers behind it can take
//! `Extension<User>`.

use crate::auth::service::AuthService;
use crate::errors::{ServiceError, ServiceResult};
use axum::{
    extract::{Extension, Request},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Extracts the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme or an empty token all count as no credentials at all.
pub fn bearer_token(headers: &HeaderMap) -> ServiceResult<&str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ServiceError::NotAuthenticated)?;

    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(ServiceError::NotAuthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ServiceError::NotAuthenticated);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(ServiceError::NotAuthenticated);
    }

    Ok(token)
}

/// JWT authentication middleware
pub async fn jwt_auth(
    Extension(auth_service): Extension<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = bearer_token(request.headers())?;

    let user = match auth_service.current_active_user(token).await {
        Ok(user) => user,
        Err(error) => {
            tracing::warn!("Rejected bearer token: {}", error);
            return Err(error);
        }
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
