//! Main entry point for the authgate backend.
//!
//! This file initializes the Axum web server, selects the credential store
//! (SQLite when `DATABASE_URL` is set, in-memory otherwise), and registers
//! the authentication routes.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use crate::repositories::{InMemoryUserRepository, SqliteUserRepository, UserRepository};
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let hasher = PasswordHasher::new(config.bcrypt_cost)?;

    let (repo, db): (Arc<dyn UserRepository>, Option<Database>) = match config.database_url {
        Some(_) => {
            let db = Database::new(&config).await?;
            let repo = SqliteUserRepository::new(db.pool().clone());
            (Arc::new(repo), Some(db))
        }
        None => (Arc::new(InMemoryUserRepository::new()), None),
    };

    if db.is_none() || config.seed_demo_users {
        UserService::new(repo.clone(), hasher.clone())
            .seed_demo_users()
            .await?;
        info!("Demo users seeded");
    }

    let jwt_utils = JwtUtils::new(&config);
    info!(
        "Access tokens ({:?}) expire after {} minutes; bcrypt cost {}",
        config.jwt_algorithm,
        jwt_utils.default_lifetime().num_minutes(),
        hasher.cost()
    );

    let auth_service = Arc::new(AuthService::new(repo, jwt_utils, hasher));
    let app = app(auth_service);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting authgate server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }

    Ok(())
}

/// Builds the full application router around a shared `AuthService`.
fn app(auth_service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .layer(Extension(auth_service))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "authgate",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the authgate API",
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
