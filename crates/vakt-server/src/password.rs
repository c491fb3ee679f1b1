use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::PasswordScheme;
use std::sync::Arc;

/// Strategy for turning a submitted password into its stored form and for
/// checking a submitted password against a stored one.
///
/// Keeps the comparison out of the auth core so the scheme can change
/// without touching registration/login logic.
pub trait CredentialVerifier: Send + Sync {
    /// Produce the representation persisted for a new credential.
    fn protect(&self, password: &str) -> Result<String>;

    /// Check a submitted password against the stored representation.
    fn verify(&self, submitted: &str, stored: &str) -> bool;
}

/// Exact string comparison against a stored raw password.
///
/// INSECURE: retained only for compatibility with records migrated from the
/// legacy service, which persisted passwords as-is. New deployments should
/// configure `password_scheme: argon2`.
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn protect(&self, password: &str) -> Result<String> {
        Ok(password.to_string())
    }

    fn verify(&self, submitted: &str, stored: &str) -> bool {
        submitted == stored
    }
}

/// argon2id salted hashes.
pub struct Argon2Verifier;

impl CredentialVerifier for Argon2Verifier {
    fn protect(&self, password: &str) -> Result<String> {
        hash_password(password)
    }

    fn verify(&self, submitted: &str, stored: &str) -> bool {
        verify_password(submitted, stored).unwrap_or(false)
    }
}

/// Build the verifier selected by config.
pub fn verifier_for(scheme: PasswordScheme) -> Arc<dyn CredentialVerifier> {
    match scheme {
        PasswordScheme::Plaintext => Arc::new(PlaintextVerifier),
        PasswordScheme::Argon2 => Arc::new(Argon2Verifier),
    }
}

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_protect_is_identity() {
        let v = PlaintextVerifier;
        assert_eq!(v.protect("p1").unwrap(), "p1");
    }

    #[test]
    fn test_plaintext_verify_exact_match() {
        let v = PlaintextVerifier;
        assert!(v.verify("p1", "p1"));
        assert!(!v.verify("p1", "P1"));
        assert!(!v.verify("p1", "p1 "));
    }

    #[test]
    fn test_argon2_protect_and_verify() {
        let v = Argon2Verifier;
        let stored = v.protect("my-secure-password").unwrap();
        assert_ne!(stored, "my-secure-password");
        assert!(v.verify("my-secure-password", &stored));
        assert!(!v.verify("wrong-password", &stored));
    }

    #[test]
    fn test_argon2_verify_garbage_hash_is_false() {
        let v = Argon2Verifier;
        assert!(!v.verify("p1", "not-a-phc-string"));
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verifier_for_scheme() {
        let plain = verifier_for(PasswordScheme::Plaintext);
        assert_eq!(plain.protect("x").unwrap(), "x");
        let argon = verifier_for(PasswordScheme::Argon2);
        assert!(argon.protect("x").unwrap().starts_with("$argon2"));
    }
}
