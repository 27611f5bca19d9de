//! Credential hasher contract.
//!
//! The hashing primitive is an external collaborator; this crate only fixes
//! the shape of the capability. Implementations live in infrastructure.

use thiserror::Error;

use warden_core::DomainError;

use crate::PasswordHash;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored hash is malformed: {0}")]
    MalformedHash(String),

    #[error("password verification failed: {0}")]
    Verify(String),
}

impl From<HashError> for DomainError {
    fn from(value: HashError) -> Self {
        DomainError::credential(value.to_string())
    }
}

/// One-way password hashing with a matching verify operation.
///
/// Salted implementations return a different `PasswordHash` for every call
/// with the same plaintext, so `verify` is the only valid way to check a
/// password.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashError>;

    /// `Ok(false)` on mismatch; `Err` only when verification could not run.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, HashError>;
}

impl<H> CredentialHasher for std::sync::Arc<H>
where
    H: CredentialHasher + ?Sized,
{
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashError> {
        (**self).hash(plaintext)
    }

    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, HashError> {
        (**self).verify(plaintext, hash)
    }
}
