//! Password hashing seam

use crate::errors::{DomainError, DomainResult};

/// External password hashing utility
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> DomainResult<String>;

    /// Whether `password` matches `hash`
    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt with a configurable cost
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| DomainError::internal(format!("password hash unreadable: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_round_trip() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal() {
        let hasher = BcryptPasswordHasher::new(4);
        assert!(matches!(
            hasher.verify("pw", "not-a-bcrypt-hash"),
            Err(DomainError::Internal { .. })
        ));
    }
}
