//! Password hashing and verification.
//!
//! New hashes are Argon2id. Verification also accepts scrypt hashes in the
//! passlib format written by the account provisioning tooling. Both use the
//! PHC string format, so algorithm parameters and salt are embedded in the
//! stored value and no separate salt column is needed.

use std::borrow::Cow;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use scrypt::Scrypt;

/// PHC identifier of scrypt hashes.
const SCRYPT_IDENT: &str = "scrypt";

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// The password matches the hash.
    Match,
    /// The hash is well-formed but the password does not match.
    Mismatch,
    /// The stored hash could not be parsed or uses an unsupported algorithm.
    MalformedHash,
}

impl PasswordCheck {
    /// Only [`PasswordCheck::Match`] grants access.
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Argon2 (`$argon2id$`, `$argon2i$`, `$argon2d$`) and scrypt (`$scrypt$`)
/// hashes are accepted. Never fails: a malformed hash or an unsupported
/// algorithm is reported as [`PasswordCheck::MalformedHash`] so the caller can
/// log it while answering exactly as for a wrong password.
pub fn verify_password(password: &str, hash: &str) -> PasswordCheck {
    let normalized = normalize_passlib_scrypt(hash);
    let Ok(parsed_hash) = PasswordHash::new(&normalized) else {
        return PasswordCheck::MalformedHash;
    };

    let result = if parsed_hash.algorithm.as_str() == SCRYPT_IDENT {
        Scrypt.verify_password(password.as_bytes(), &parsed_hash)
    } else {
        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
    };

    match result {
        Ok(()) => PasswordCheck::Match,
        Err(argon2::password_hash::Error::Password) => PasswordCheck::Mismatch,
        Err(_) => PasswordCheck::MalformedHash,
    }
}

/// passlib writes salt and checksum in "adapted base64", which uses `.`
/// where standard base64 uses `+`.
fn normalize_passlib_scrypt(hash: &str) -> Cow<'_, str> {
    if hash.starts_with("$scrypt$") && hash.contains('.') {
        Cow::Owned(hash.replace('.', "+"))
    } else {
        Cow::Borrowed(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "wonderland";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert_eq!(verify_password(password, &hash), PasswordCheck::Match);
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("real-password").expect("hashing should succeed");
        let check = verify_password("wrong-password", &hash);
        assert_eq!(check, PasswordCheck::Mismatch);
        assert!(!check.is_match());
    }

    #[test]
    fn test_repeated_checks_are_stable() {
        let hash = hash_password("wonderland").expect("hashing should succeed");
        for _ in 0..3 {
            assert!(!verify_password("looking-glass", &hash).is_match());
            assert!(verify_password("wonderland", &hash).is_match());
        }
    }

    #[test]
    fn test_malformed_hash_is_not_a_match() {
        for hash in ["", "plaintext", "$argon2id$v=19$m=19456,t=2,p=1$!!!$***"] {
            let check = verify_password("anything", hash);
            assert_eq!(check, PasswordCheck::MalformedHash, "hash: {hash:?}");
            assert!(!check.is_match());
        }
    }

    /// passlib `scrypt` hash of "wonderland" (ln=4, r=8, p=1); the salt
    /// carries a `.` from passlib's base64 alphabet.
    const PASSLIB_SCRYPT_WONDERLAND: &str =
        "$scrypt$ln=4,r=8,p=1$X.zrZv/IbzjZUnhsbWlseQ$2o4FJNCqC8q93EROiA3ajJQRyCSpR/jVy9Z7nDHzoXU";

    #[test]
    fn test_passlib_scrypt_hash_verifies() {
        assert_eq!(
            verify_password("wonderland", PASSLIB_SCRYPT_WONDERLAND),
            PasswordCheck::Match
        );
        assert_eq!(
            verify_password("looking-glass", PASSLIB_SCRYPT_WONDERLAND),
            PasswordCheck::Mismatch
        );
    }

    #[test]
    fn test_unsupported_algorithm_is_malformed() {
        assert_eq!(
            verify_password("wonderland", "$md5$c2FsdHNhbHQ$aGFzaGhhc2g"),
            PasswordCheck::MalformedHash
        );
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("wonderland").unwrap();
        let b = hash_password("wonderland").unwrap();
        assert_ne!(a, b);
    }
}
