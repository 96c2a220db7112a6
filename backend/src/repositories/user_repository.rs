//! Database repository for credential records.
//!
//! Persists users in the SQLite `users` table created by `Database`.

use super::UserRepository;
use crate::database::models::User;
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Repository for user database operations.
#[derive(Clone)]
pub struct SqliteUserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool; the schema must already exist
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    /// # Returns
    /// `Some(User)` if a record with this username exists, `None` otherwise
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT username, full_name, email, hashed_password, disabled
            FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (username, full_name, email, hashed_password, disabled)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(user.disabled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> SqliteUserRepository {
        // a single connection keeps the in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let db = Database::from_pool(pool).await.unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = repo().await;
        repo.create_user(User {
            username: "alice".to_string(),
            full_name: Some("Alice Wonderson".to_string()),
            email: Some("alice@example.com".to_string()),
            hashed_password: "$2b$04$placeholder".to_string(),
            disabled: true,
        })
        .await
        .unwrap();

        let user = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(user.full_name.as_deref(), Some("Alice Wonderson"));
        assert_eq!(user.email.as_deref(), Some("alice@example.com"));
        assert!(user.disabled);
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let repo = repo().await;
        let user = User {
            username: "johndoe".to_string(),
            full_name: None,
            email: None,
            hashed_password: "$2b$04$placeholder".to_string(),
            disabled: false,
        };

        repo.create_user(user.clone()).await.unwrap();
        assert!(repo.create_user(user).await.is_err());
    }
}
