use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use super::AuthError;
use crate::config::SecurityConfig;

/// Salted Argon2id hashing for account secrets.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Verified when the account does not exist so both failure paths cost the same.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut hasher = Self {
            argon2,
            dummy_hash: String::new(),
        };
        hasher.dummy_hash = hasher.hash("receitas-dummy-secret")?;
        Ok(hasher)
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(security.password_memory_kib, security.password_iterations)
    }

    /// Hash a secret into a PHC string with a fresh random salt.
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Constant-time check of `secret` against a stored PHC string.
    ///
    /// `None` stands for an unknown account: a dummy hash is verified and the
    /// result is always `false`.
    pub fn verify(&self, secret: &str, stored: Option<&str>) -> Result<bool, AuthError> {
        let (phc, known) = match stored {
            Some(phc) => (phc, true),
            None => (self.dummy_hash.as_str(), false),
        };
        let parsed = PasswordHash::new(phc).map_err(|e| AuthError::Hashing(e.to_string()))?;
        let matches = self.argon2.verify_password(secret.as_bytes(), &parsed).is_ok();
        Ok(known && matches)
    }

    /// [`Self::hash`] on the blocking pool; Argon2 is deliberately slow.
    pub async fn hash_blocking(&self, secret: String) -> Result<String, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    /// [`Self::verify`] on the blocking pool.
    pub async fn verify_blocking(&self, secret: String, stored: Option<String>) -> Result<bool, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&secret, stored.as_deref()))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }
}
