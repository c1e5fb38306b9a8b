use async_trait::async_trait;
use axum_helpers::{CredentialVerifier, Principal};
use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserRole, non_blank};
use crate::password::{Argon2PasswordEncryptor, PasswordEncryptor};
use crate::repository::UserRepository;

const BASIC_PREFIX: &str = "Basic ";

/// Standard alphabet; trailing `=` padding is optional.
const BASIC_CREDENTIALS: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// User management and HTTP Basic authentication.
pub struct AuthenticationService<R: UserRepository> {
    repository: Arc<R>,
    encryptor: Arc<dyn PasswordEncryptor>,
}

impl<R: UserRepository> AuthenticationService<R> {
    /// Service with Argon2 password encryption.
    pub fn new(repository: R) -> Self {
        Self::with_encryptor(repository, Arc::new(Argon2PasswordEncryptor::new()))
    }

    pub fn with_encryptor(repository: R, encryptor: Arc<dyn PasswordEncryptor>) -> Self {
        Self {
            repository: Arc::new(repository),
            encryptor,
        }
    }

    /// Resolve an `Authorization: Basic <base64(email:password)>` header to a user.
    ///
    /// Every failure is `None`: absent header, other scheme, bad base64 or
    /// UTF-8, no `:` separator, unknown email, wrong password, storage fault.
    pub async fn authenticate_basic(&self, header: Option<&str>) -> Option<User> {
        let (email, password) = decode_basic(header?)?;

        let user = match self.repository.find_by_email(&email).await {
            Ok(user) => user?,
            Err(e) => {
                tracing::warn!(error = %e, "User lookup failed during authentication");
                return None;
            }
        };

        if self.encryptor.matches(&password, &user.password) {
            Some(user)
        } else {
            tracing::debug!(email = %email, "Password mismatch");
            None
        }
    }

    /// Register a user, encrypting the password. Role defaults to `USER`.
    ///
    /// An existing user with the same email is replaced; callers check
    /// [`Self::user_exists`] first when that matters.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
        role: Option<UserRole>,
    ) -> UserResult<User> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(UserError::InvalidArgument(
                "Email and password are required".to_string(),
            ));
        }

        let user = User {
            email: email.to_string(),
            password: self.encryptor.encrypt(password)?,
            name: name.map(str::to_string),
            role: role.unwrap_or_default(),
        };

        let saved = self.repository.save(user).await?;
        tracing::info!(email = %saved.email, role = %saved.role, "User registered");
        Ok(saved)
    }

    pub async fn user_exists(&self, email: &str) -> UserResult<bool> {
        if email.trim().is_empty() {
            return Ok(false);
        }
        self.repository.exists_by_email(email).await
    }

    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    pub async fn get_user_by_email(&self, email: &str) -> UserResult<Option<User>> {
        if email.trim().is_empty() {
            return Ok(None);
        }
        self.repository.find_by_email(email).await
    }

    /// Replace password and/or name. Blank or absent values are left alone.
    ///
    /// `Ok(None)` when there is no such user.
    pub async fn update_user(
        &self,
        email: &str,
        password: Option<&str>,
        name: Option<&str>,
    ) -> UserResult<Option<User>> {
        if email.trim().is_empty() {
            return Ok(None);
        }

        let Some(mut user) = self.repository.find_by_email(email).await? else {
            return Ok(None);
        };

        if let Some(password) = non_blank(password) {
            user.password = self.encryptor.encrypt(password)?;
        }
        if let Some(name) = non_blank(name) {
            user.name = Some(name.to_string());
        }

        let saved = self.repository.save(user).await?;
        tracing::info!(email = %saved.email, "User updated");
        Ok(Some(saved))
    }

    /// `true` if a user was removed. Blank emails are never looked up.
    pub async fn delete_user(&self, email: &str) -> UserResult<bool> {
        if email.trim().is_empty() {
            return Ok(false);
        }

        let deleted = self.repository.delete_by_email(email).await?;
        if deleted {
            tracing::info!(email = %email, "User deleted");
        }
        Ok(deleted)
    }
}

fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix(BASIC_PREFIX)?.trim();
    let decoded = BASIC_CREDENTIALS.decode(encoded).ok()?;
    let credentials = String::from_utf8(decoded).ok()?;
    let (email, password) = credentials.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

#[async_trait]
impl<R: UserRepository + 'static> CredentialVerifier for AuthenticationService<R> {
    async fn verify(&self, authorization: Option<&str>) -> Option<Principal> {
        self.authenticate_basic(authorization)
            .await
            .map(|user| Principal {
                subject: user.email,
                role: user.role.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
    use crate::password::MockPasswordEncryptor;
    use crate::repository::{DataStoreUserRepository, MockUserRepository};
    use database::{DatabaseError, InMemoryDataStore};

    /// Reversible stand-in so tests skip Argon2.
    fn fake_encryptor() -> Arc<dyn PasswordEncryptor> {
        let mut mock = MockPasswordEncryptor::new();
        mock.expect_encrypt()
            .returning(|raw| Ok(format!("enc:{}", raw)));
        mock.expect_matches()
            .returning(|raw, encrypted| encrypted == format!("enc:{}", raw));
        Arc::new(mock)
    }

    fn service() -> AuthenticationService<DataStoreUserRepository> {
        let repository = DataStoreUserRepository::new(Arc::new(InMemoryDataStore::new()));
        AuthenticationService::with_encryptor(repository, fake_encryptor())
    }

    fn basic(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let service = service();
        service
            .register_user("ada@example.com", "pw", Some("Ada"), None)
            .await
            .unwrap();

        let header = basic("ada@example.com:pw");
        let user = service.authenticate_basic(Some(&header)).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.password, "enc:pw");
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_none() {
        let service = service();
        service
            .register_user("ada@example.com", "pw", None, None)
            .await
            .unwrap();

        let headers = [
            None,
            Some("Bearer abc".to_string()),
            Some("Basic !!!not-base64".to_string()),
            Some(basic("no-separator")),
            Some(basic("nobody@example.com:pw")),
            Some(basic("ada@example.com:wrong")),
        ];

        for header in headers {
            assert!(
                service.authenticate_basic(header.as_deref()).await.is_none(),
                "{:?} should not authenticate",
                header
            );
        }
    }

    #[tokio::test]
    async fn test_authenticate_without_padding() {
        let service = service();
        service
            .register_user("user", "pw", None, None)
            .await
            .unwrap();

        // "user:pw" encodes to "dXNlcjpwdw==" with padding
        let unpadded = format!("Basic {}", STANDARD_NO_PAD.encode("user:pw"));
        assert_eq!(unpadded, "Basic dXNlcjpwdw");
        assert!(service.authenticate_basic(Some(&unpadded)).await.is_some());
        assert!(
            service
                .authenticate_basic(Some(&basic("user:pw")))
                .await
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_password_may_contain_separator() {
        let service = service();
        service
            .register_user("ada@example.com", "a:b", None, None)
            .await
            .unwrap();

        let header = basic("ada@example.com:a:b");
        assert!(service.authenticate_basic(Some(&header)).await.is_some());
    }

    #[tokio::test]
    async fn test_register_requires_email_and_password() {
        let service = service();

        for (email, password) in [("", "x"), ("e", ""), ("  ", "x"), ("e", " ")] {
            let err = service
                .register_user(email, password, Some("n"), None)
                .await
                .unwrap_err();
            assert!(
                matches!(err, UserError::InvalidArgument(ref m) if m == "Email and password are required")
            );
        }
    }

    #[tokio::test]
    async fn test_blank_email_lookups() {
        let service = service();
        assert!(!service.user_exists("").await.unwrap());
        assert!(service.get_user_by_email(" ").await.unwrap().is_none());
        assert!(service.update_user("", Some("pw"), None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_email_delete_skips_storage() {
        // No expectations: any repository call panics.
        let repository = MockUserRepository::new();
        let service = AuthenticationService::with_encryptor(repository, fake_encryptor());

        assert!(!service.delete_user("").await.unwrap());
        assert!(!service.delete_user("   ").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_with_nothing_returns_unchanged() {
        let service = service();
        let registered = service
            .register_user("ada@example.com", "pw", Some("Ada"), Some(UserRole::Manager))
            .await
            .unwrap();

        let updated = service
            .update_user("ada@example.com", Some(" "), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, registered);
    }

    #[tokio::test]
    async fn test_update_password_reencrypts() {
        let service = service();
        service
            .register_user("ada@example.com", "old", None, None)
            .await
            .unwrap();

        let updated = service
            .update_user("ada@example.com", Some("new"), Some("Ada"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.password, "enc:new");
        assert_eq!(updated.name.as_deref(), Some("Ada"));

        let old = basic("ada@example.com:old");
        let new = basic("ada@example.com:new");
        assert!(service.authenticate_basic(Some(&old)).await.is_none());
        assert!(service.authenticate_basic(Some(&new)).await.is_some());
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_none() {
        let service = service();
        let result = service
            .update_user("ghost@example.com", Some("pw"), None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = service();
        service
            .register_user("ada@example.com", "pw", None, None)
            .await
            .unwrap();

        assert!(service.delete_user("ada@example.com").await.unwrap());
        assert!(!service.delete_user("ada@example.com").await.unwrap());
        assert!(service.get_user_by_email("ada@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_fault_during_authentication_is_none() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(|_| Err(UserError::Storage(DatabaseError::Generic("down".into()))));
        let service = AuthenticationService::with_encryptor(repository, fake_encryptor());

        let header = basic("ada@example.com:pw");
        assert!(service.authenticate_basic(Some(&header)).await.is_none());
    }

    #[tokio::test]
    async fn test_verifier_yields_principal() {
        let service = service();
        service
            .register_user("ada@example.com", "pw", None, Some(UserRole::Admin))
            .await
            .unwrap();

        let header = basic("ada@example.com:pw");
        let principal = service.verify(Some(&header)).await.unwrap();
        assert_eq!(principal.subject, "ada@example.com");
        assert_eq!(principal.role, "ADMIN");
    }
}
