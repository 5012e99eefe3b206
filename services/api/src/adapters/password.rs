//! services/api/src/adapters/password.rs
//!
//! Argon2 password hashing behind the `PasswordService` port.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use research_chat_core::ports::{PasswordService, PortError, PortResult};

/// Hashes with a per-password random salt; verification is constant-time
/// inside the argon2 crate.
pub struct Argon2PasswordService;

impl PasswordService for Argon2PasswordService {
    fn hash_password(&self, plaintext: &str) -> PortResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PortError::Unexpected(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, plaintext: &str, password_hash: &str) -> PortResult<bool> {
        let parsed_hash = PasswordHash::new(password_hash).map_err(|e| {
            PortError::Unexpected(format!("Stored password hash is malformed: {}", e))
        })?;
        Ok(Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_passwords_verify_and_reject() {
        let passwords = Argon2PasswordService;
        let hash = passwords.hash_password("pw123").unwrap();

        assert!(passwords.verify_password("pw123", &hash).unwrap());
        assert!(!passwords.verify_password("wrongpass", &hash).unwrap());
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let passwords = Argon2PasswordService;
        let first = passwords.hash_password("pw123").unwrap();
        let second = passwords.hash_password("pw123").unwrap();

        assert_ne!(first, second);
        assert!(passwords.verify_password("pw123", &second).unwrap());
    }

    #[test]
    fn malformed_stored_hashes_are_an_error_not_a_mismatch() {
        let passwords = Argon2PasswordService;
        assert!(passwords.verify_password("pw123", "not-a-phc-string").is_err());
    }
}
