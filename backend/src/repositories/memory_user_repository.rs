//! In-memory credential store.
//!
//! Used when no database is configured. Reads take a shared lock; the only
//! writer is administrative seeding at startup.

use super::UserRepository;
use crate::database::models::User;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        Ok(users.get(username).cloned())
    }

    async fn create_user(&self, user: User) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        if users.contains_key(&user.username) {
            bail!("User already exists: {}", user.username);
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }
}
