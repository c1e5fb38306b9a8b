use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// One-way password encryption.
///
/// `encrypt` output is self-describing (salt and parameters included), so
/// `matches` needs nothing but the stored value.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordEncryptor: Send + Sync {
    fn encrypt(&self, raw: &str) -> UserResult<String>;

    /// `false` for a wrong password and for a stored value that is not a valid hash.
    fn matches(&self, raw: &str, encrypted: &str) -> bool;
}

/// Argon2id with a random salt per password, PHC string output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordEncryptor;

impl Argon2PasswordEncryptor {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordEncryptor for Argon2PasswordEncryptor {
    fn encrypt(&self, raw: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn matches(&self, raw: &str, encrypted: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(encrypted) else {
            tracing::warn!("Stored credential is not a valid password hash");
            return false;
        };

        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_then_match() {
        let encryptor = Argon2PasswordEncryptor::new();
        let encrypted = encryptor.encrypt("s3cret").unwrap();

        assert_ne!(encrypted, "s3cret");
        assert!(encrypted.starts_with("$argon2"));
        assert!(encryptor.matches("s3cret", &encrypted));
        assert!(!encryptor.matches("wrong", &encrypted));
    }

    #[test]
    fn test_salt_differs_per_call() {
        let encryptor = Argon2PasswordEncryptor::new();
        let first = encryptor.encrypt("same").unwrap();
        let second = encryptor.encrypt("same").unwrap();

        assert_ne!(first, second);
        assert!(encryptor.matches("same", &first));
        assert!(encryptor.matches("same", &second));
    }

    #[test]
    fn test_plaintext_stored_value_never_matches() {
        let encryptor = Argon2PasswordEncryptor::new();
        assert!(!encryptor.matches("s3cret", "s3cret"));
    }
}
