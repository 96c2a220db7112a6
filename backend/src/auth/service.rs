//! Core business logic for the authentication system.
//!
//! Request lifecycle for a protected call:
//! `Unauthenticated -> TokenDecoded -> SubjectResolved -> Authenticated`.
//! Any failed step ends the request with a rejection.

use crate::auth::models::{LoginForm, TokenResponse};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::UserRepository;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use validator::Validate;

/// Authentication service for credential checks, token issuance and
/// current-user resolution.
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    jwt_utils: JwtUtils,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, jwt_utils: JwtUtils, hasher: PasswordHasher) -> Self {
        AuthService {
            repo,
            jwt_utils,
            hasher,
        }
    }

    #[cfg(test)]
    pub fn jwt_utils(&self) -> &JwtUtils {
        &self.jwt_utils
    }

    /// Checks a username/password pair against the credential store.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> ServiceResult<User> {
        let Some(user) = self.repo.find_by_username(username).await? else {
            self.hasher.verify_dummy(password);
            return Err(ServiceError::InvalidCredentials);
        };

        if !self.hasher.verify_password(password, &user.hashed_password) {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Authenticate user and issue a bearer token.
    pub async fn login(&self, form: LoginForm) -> ServiceResult<TokenResponse> {
        if let Err(validation_errors) = form.validate() {
            return Err(ServiceError::from_validation(&validation_errors));
        }

        if let Some(grant_type) = form.grant_type.as_deref() {
            if grant_type != "password" {
                return Err(ServiceError::validation(
                    "grant_type: Only the password grant is supported",
                ));
            }
        }

        let user = match self.authenticate_user(&form.username, &form.password).await {
            Ok(user) => user,
            Err(ServiceError::InvalidCredentials) => {
                tracing::warn!("Rejected login for {}", form.username);
                return Err(ServiceError::InvalidCredentials);
            }
            Err(error) => return Err(error),
        };

        let access_token = self.jwt_utils.generate_token(&user.username, None)?;
        tracing::info!("Issued access token for {}", user.username);

        Ok(TokenResponse::bearer(access_token))
    }

    /// Resolves the user named by a bearer token.
    ///
    /// Bad signature, expiry, missing subject and unknown subject all yield
    /// the same `InvalidToken`.
    pub async fn current_user(&self, token: &str) -> ServiceResult<User> {
        let claims = self.jwt_utils.validate_token(token)?;

        let username = claims.subject().ok_or(ServiceError::InvalidToken)?;

        self.repo
            .find_by_username(username)
            .await?
            .ok_or(ServiceError::InvalidToken)
    }

    /// Like [`current_user`](Self::current_user), additionally rejecting
    /// disabled accounts.
    pub async fn current_active_user(&self, token: &str) -> ServiceResult<User> {
        let user = self.current_user(token).await?;
        ensure_active(user)
    }
}

/// Rejects disabled accounts with `InactiveAccount`.
fn ensure_active(user: User) -> ServiceResult<User> {
    if !user.is_active() {
        return Err(ServiceError::InactiveAccount);
    }
    Ok(user)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repositories::InMemoryUserRepository;
    use crate::utils::jwt::Claims;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    pub(crate) fn test_config(secret: &str) -> Config {
        Config {
            database_url: None,
            max_connections: 1,
            acquire_timeout_seconds: 1,
            seed_demo_users: false,
            jwt_secret: secret.to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 30,
            bcrypt_cost: 4,
            server_port: 0,
        }
    }

    /// Store with an active `johndoe`/`secret` and a disabled `alice`/`secret2`.
    pub(crate) async fn test_service() -> AuthService {
        let config = test_config("test_secret_key");
        let hasher = PasswordHasher::new(config.bcrypt_cost).unwrap();
        let repo = InMemoryUserRepository::new();

        for (username, password, disabled) in
            [("johndoe", "secret", false), ("alice", "secret2", true)]
        {
            repo.create_user(User {
                username: username.to_string(),
                full_name: None,
                email: Some(format!("{username}@example.com")),
                hashed_password: hasher.hash_password(password).unwrap(),
                disabled,
            })
            .await
            .unwrap();
        }

        AuthService::new(Arc::new(repo), JwtUtils::new(&config), hasher)
    }

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
            grant_type: None,
        }
    }

    #[tokio::test]
    async fn test_authenticate_matching_password() {
        let service = test_service().await;
        let user = service.authenticate_user("johndoe", "secret").await.unwrap();
        assert_eq!(user.username, "johndoe");
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password_and_unknown_user() {
        let service = test_service().await;

        assert!(matches!(
            service.authenticate_user("johndoe", "wrong").await,
            Err(ServiceError::InvalidCredentials)
        ));
        assert!(matches!(
            service.authenticate_user("nobody", "secret").await,
            Err(ServiceError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_subject() {
        let service = test_service().await;
        let response = service.login(form("johndoe", "secret")).await.unwrap();

        assert_eq!(response.token_type, "bearer");
        let claims = service
            .jwt_utils()
            .validate_token(&response.access_token)
            .unwrap();
        assert_eq!(claims.subject(), Some("johndoe"));
    }

    #[tokio::test]
    async fn test_login_validates_form() {
        let service = test_service().await;

        assert!(matches!(
            service.login(form("", "secret")).await,
            Err(ServiceError::Validation { .. })
        ));

        let mut bad_grant = form("johndoe", "secret");
        bad_grant.grant_type = Some("client_credentials".to_string());
        assert!(matches!(
            service.login(bad_grant).await,
            Err(ServiceError::Validation { .. })
        ));

        let mut good_grant = form("johndoe", "secret");
        good_grant.grant_type = Some("password".to_string());
        assert!(service.login(good_grant).await.is_ok());
    }

    #[tokio::test]
    async fn test_disabled_user_can_log_in_but_is_not_active() {
        let service = test_service().await;
        let response = service.login(form("alice", "secret2")).await.unwrap();

        let user = service.current_user(&response.access_token).await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(matches!(
            service.current_active_user(&response.access_token).await,
            Err(ServiceError::InactiveAccount)
        ));
    }

    #[tokio::test]
    async fn test_current_active_user() {
        let service = test_service().await;
        let token = service.jwt_utils().generate_token("johndoe", None).unwrap();

        let user = service.current_active_user(&token).await.unwrap();
        assert_eq!(user.username, "johndoe");
    }

    #[tokio::test]
    async fn test_unknown_subject_is_indistinguishable_from_forgery() {
        let service = test_service().await;
        let token = service.jwt_utils().generate_token("ghost", None).unwrap();

        assert!(matches!(
            service.current_user(&token).await,
            Err(ServiceError::InvalidToken)
        ));
    }

    /// Signs arbitrary claims with the secret `test_service` trusts.
    pub(crate) fn signed_claims(sub: Option<&str>) -> String {
        let claims = Claims {
            sub: sub.map(str::to_string),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret_key"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_token_without_subject_is_rejected_like_forgery() {
        let service = test_service().await;

        for sub in [None, Some("")] {
            let token = signed_claims(sub);
            assert!(matches!(
                service.current_user(&token).await,
                Err(ServiceError::InvalidToken)
            ));
        }
    }

    #[tokio::test]
    async fn test_login_failure_from_store_is_not_masked() {
        let service = AuthService::new(
            Arc::new(FailingRepository),
            JwtUtils::new(&test_config("test_secret_key")),
            PasswordHasher::new(4).unwrap(),
        );

        assert!(matches!(
            service.login(form("johndoe", "secret")).await,
            Err(ServiceError::Database { .. })
        ));
    }

    struct FailingRepository;

    #[async_trait::async_trait]
    impl UserRepository for FailingRepository {
        async fn find_by_username(&self, _username: &str) -> anyhow::Result<Option<User>> {
            anyhow::bail!("connection refused")
        }

        async fn create_user(&self, _user: User) -> anyhow::Result<()> {
            anyhow::bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_expired_and_foreign_tokens_are_rejected() {
        let service = test_service().await;

        let expired = service
            .jwt_utils()
            .generate_token_at(
                "johndoe",
                Utc::now() - Duration::minutes(60),
                Some(Duration::minutes(30)),
            )
            .unwrap();
        assert!(matches!(
            service.current_user(&expired).await,
            Err(ServiceError::InvalidToken)
        ));

        let foreign = JwtUtils::new(&test_config("another_secret"))
            .generate_token("johndoe", None)
            .unwrap();
        assert!(matches!(
            service.current_user(&foreign).await,
            Err(ServiceError::InvalidToken)
        ));
    }
}
