use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a password with a fresh random salt.
pub(crate) fn hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "password hashing failed");
            anyhow!("password hashing failed: {}", e)
        })?;
    Ok(hashed.to_string())
}

/// Check a password against a stored hash. A malformed stored hash is an
/// error, not a mismatch.
pub(crate) fn verify(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow!("stored password hash is malformed: {}", e)
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_accepts_the_password() {
        let hashed = hash("hunter42!").expect("hash");
        assert!(hashed.starts_with("$argon2"));
        assert!(verify("hunter42!", &hashed).expect("verify"));
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let hashed = hash("first-password").expect("hash");
        assert!(!verify("second-password", &hashed).expect("verify"));
    }

    #[test]
    fn two_hashes_of_one_password_differ() {
        let a = hash("same").expect("hash");
        let b = hash("same").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_stored_hash() {
        assert!(verify("anything", "not-a-hash").is_err());
    }
}
