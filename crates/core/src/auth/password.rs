//! Argon2id password hashing stored as PHC strings.

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Password hashing failures. A wrong password is not an error.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Argon2 refused to hash or verify.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// The stored value is not a PHC string.
    #[error("stored password hash is malformed")]
    InvalidHash,
}

/// Hashes `password` with a fresh random salt.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if Argon2 fails.
///
/// ```
/// use fintrack_core::auth::hash_password;
///
/// let hash = hash_password("s3nha-forte").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Checks `password` against a stored PHC hash.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` when `stored` cannot be parsed.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::HashError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_accepts_only_the_same_password() {
        let hash = hash_password("s3nha-forte").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("s3nha-forte"));

        assert!(verify_password("s3nha-forte", &hash).unwrap());
        assert!(!verify_password("S3nha-forte", &hash).unwrap());
    }

    #[test]
    fn test_salt_differs_per_hash() {
        assert_ne!(hash_password("repeat").unwrap(), hash_password("repeat").unwrap());
    }

    #[test]
    fn test_empty_password_still_hashes() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password(" ", &hash).unwrap());
    }

    #[test]
    fn test_non_phc_hash_is_malformed() {
        let result = verify_password("anything", "plain-text");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }
}
