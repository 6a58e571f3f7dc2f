//! Password hashing
//!
//! Users carry a per-account random salt and a hex SHA-256 digest of
//! salt + password. Verification recomputes the digest and compares.

use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a random 16-byte salt as 32 hex characters
pub fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a password with its salt, returning 64 hex characters
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verify a candidate password against a stored salt and hash
pub fn verify_password(salt: &str, stored_hash: &str, candidate: &str) -> bool {
    hash_password(salt, candidate) == stored_hash
}
