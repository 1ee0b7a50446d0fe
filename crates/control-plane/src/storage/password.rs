// Student password hashing
// Decision: Argon2id with default parameters; the PHC string is stored as-is

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Returns a user-facing reason when the password is unacceptable
pub fn password_policy_violation(password: &str) -> Option<&'static str> {
    if password.trim().is_empty() {
        return Some("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Some("Password must be at least 8 characters");
    }
    None
}

/// Hash a password into an Argon2id PHC string
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Check a password against a stored PHC string.
/// A stored value that does not parse is an error, a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| anyhow!("Stored password hash is invalid: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong horse battery", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert_eq!(password_policy_violation(""), Some("Password is required"));
        assert_eq!(
            password_policy_violation("short"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(password_policy_violation("long enough"), None);
    }
}
