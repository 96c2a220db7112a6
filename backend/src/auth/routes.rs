//! Defines the HTTP routes for authentication.
//!
//! `POST /token` is public; everything under `/users/me/` requires an
//! active user holding a valid bearer token.

use crate::auth::handlers::*;
use crate::auth::middleware::*;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes.
///
/// Expects an `Extension<Arc<AuthService>>` layered on the outer router.
pub fn auth_router() -> Router {
    let protected = Router::new()
        .route("/users/me/", get(me))
        .route("/users/me/items/", get(my_items))
        .route_layer(middleware::from_fn(jwt_auth));

    Router::new().route("/token", post(login)).merge(protected)
}
