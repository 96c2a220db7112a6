//! User provisioning service.
//!
//! Administrative path for the credential store: validates new records,
//! hashes their passwords and hands them to the repository.

use crate::database::models::{CreateNewUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserRepository;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use validator::Validate;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl UserService {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `repo` - Credential store to write into
    /// * `hasher` - Hasher used for the stored password hashes
    pub fn new(repo: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    /// Creates a new user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - Hashing failures
    /// - Storage failures, including a taken username
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        if let Err(validation_errors) = create_user.validate() {
            return Err(ServiceError::from_validation(&validation_errors));
        }

        let hashed_password = self.hasher.hash_password(&create_user.password)?;

        let user = User {
            username: create_user.username,
            full_name: create_user.full_name,
            email: create_user.email,
            hashed_password,
            disabled: create_user.disabled,
        };

        self.repo.create_user(user.clone()).await?;
        tracing::info!("Created user {}", user.username);
        Ok(user)
    }

    /// Seeds the demonstration accounts: an active `johndoe` and a disabled
    /// `alice`.
    pub async fn seed_demo_users(&self) -> ServiceResult<()> {
        for demo in demo_users() {
            if self.repo.find_by_username(&demo.username).await?.is_some() {
                tracing::debug!("Demo user {} already present", demo.username);
                continue;
            }
            self.create_user(demo).await?;
        }
        Ok(())
    }
}

fn demo_users() -> Vec<CreateNewUser> {
    vec![
        CreateNewUser {
            username: "johndoe".to_string(),
            full_name: Some("John Doe".to_string()),
            email: Some("johndoe@example.com".to_string()),
            password: "secret".to_string(),
            disabled: false,
        },
        CreateNewUser {
            username: "alice".to_string(),
            full_name: Some("Alice Wonderson".to_string()),
            email: Some("alice@example.com".to_string()),
            password: "secret2".to_string(),
            disabled: true,
        },
    ]
}
