//! Credential store abstractions and implementations.
//!
//! The authentication service only ever needs lookup-by-username; the write
//! path is administrative (seeding, provisioning) and never runs while
//! serving a request.

use crate::database::models::User;
use anyhow::Result;
use async_trait::async_trait;

pub mod memory_user_repository;
pub mod user_repository;

pub use memory_user_repository::InMemoryUserRepository;
pub use user_repository::SqliteUserRepository;

/// Storage backend for credential records.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Retrieves a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Stores a new credential record. Fails if the username is taken.
    async fn create_user(&self, user: User) -> Result<()>;
}
