//! Password hashing for admins and professors.
//!
//! Hashes are argon2id in PHC string format, each with its own random salt.
//! The cost parameters come from [`HashingCost`] so deployments can raise the
//! work factor; verification reads the parameters back out of the stored
//! hash, so older hashes keep verifying after the cost changes.
//!
//! Argon2 is CPU bound, so the async entry points run it on the blocking pool.

use std::sync::Arc;

use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use thiserror::Error;

use crate::config::HashingCost;

/// Plaintext behind the decoy hash. Never stored for any account.
pub(crate) const DECOY_PASSWORD: &str = "decoy-password-never-issued";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("invalid hashing parameters: {0}")]
    Params(String),

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    Format(String),

    #[error("hashing task failed: {0}")]
    Task(String),
}

#[derive(Clone)]
pub struct CredentialStore {
    argon2: Argon2<'static>,
    /// Hash of a throwaway password at the configured cost. Logins for
    /// unknown identities verify against it so both failure paths do the
    /// same work.
    decoy: Arc<str>,
}

impl CredentialStore {
    pub fn new(cost: &HashingCost) -> Result<Self, CredentialError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| CredentialError::Params(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy = hash_with(&argon2, DECOY_PASSWORD)?;
        Ok(Self {
            argon2,
            decoy: decoy.into(),
        })
    }

    pub async fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hash_with(&argon2, &password))
            .await
            .map_err(|e| CredentialError::Task(e.to_string()))?
    }

    /// A wrong password is `Ok(false)`; only an unparseable hash is an error.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let argon2 = self.argon2.clone();
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || verify_with(&argon2, &password, &hash))
            .await
            .map_err(|e| CredentialError::Task(e.to_string()))?
    }

    /// Verifies against the decoy hash and discards the outcome. Always `false`.
    pub async fn verify_decoy(&self, password: &str) -> bool {
        let decoy = self.decoy.clone();
        let _ = self.verify(password, &decoy).await;
        false
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

fn verify_with(argon2: &Argon2<'_>, password: &str, hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(hash).map_err(|e| CredentialError::Format(e.to_string()))?;
    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Format(e.to_string())),
    }
}
