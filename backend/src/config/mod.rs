//! Central module for application-wide configuration settings.
//!
//! Settings come from environment variables (optionally seeded from a `.env`
//! file): the token signing secret and lifetime, bcrypt cost, the optional
//! SQLite credential store, and the server port.

use anyhow::{Context, Result, bail};
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL for the credential store. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub seed_demo_users: bool,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let seed_demo_users = lookup("SEED_DEMO_USERS")
            .unwrap_or_else(|| "false".to_string())
            .parse::<bool>()
            .context("SEED_DEMO_USERS must be true or false")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let algorithm_name = lookup("JWT_ALGORITHM").unwrap_or_else(|| "HS256".to_string());
        let jwt_algorithm = Algorithm::from_str(&algorithm_name)
            .with_context(|| format!("JWT_ALGORITHM '{}' is not recognised", algorithm_name))?;
        if !matches!(
            jwt_algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!(
                "JWT_ALGORITHM must be one of HS256, HS384, HS512 (got {})",
                algorithm_name
            );
        }

        let access_token_expire_minutes = lookup("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|| "30".to_string())
            .parse::<i64>()
            .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid number")?;
        if access_token_expire_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            seed_demo_users,
            jwt_secret,
            jwt_algorithm,
            access_token_expire_minutes,
            bcrypt_cost,
            server_port,
        })
    }
}
