//! Password salting and digest helpers.

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

const SALT_BYTES: usize = 16;

/// Generate a fresh per-account salt, hex-encoded.
#[must_use]
pub fn generate_password_salt() -> String {
    let mut salt = [0_u8; SALT_BYTES];

    OsRng.fill_bytes(&mut salt);

    salt.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Digest a password with its salt; stored as lowercase hex.
#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());

    format!("{:x}", hasher.finalize())
}

/// Check a candidate password against the stored salt and digest.
#[must_use]
pub fn verify_password(salt: &str, digest: &str, candidate: &str) -> bool {
    hash_password(salt, candidate) == digest
}
