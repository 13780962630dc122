use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::AppError;

/// Salt length in bytes; matches the HMAC-SHA512 block size.
pub const SALT_LEN: usize = 128;
/// Length of an HMAC-SHA512 tag in bytes.
pub const HASH_LEN: usize = 64;

const DUMMY_SALT: [u8; SALT_LEN] = [0x5a; SALT_LEN];
const DUMMY_HASH: [u8; HASH_LEN] = [0; HASH_LEN];

/// Salt and keyed hash computed for one password.
#[derive(Debug, Clone)]
pub struct PasswordDigest {
    pub hash: Vec<u8>,
    pub salt: Vec<u8>,
}

/// Hashes `password` under a freshly generated random salt.
pub fn hash_password(password: &str) -> Result<PasswordDigest, AppError> {
    let mut salt = vec![0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::InternalServerError("Failed to generate password salt".into()))?;

    let hash = compute_hash(&salt, password);
    Ok(PasswordDigest { hash, salt })
}

/// HMAC-SHA512 of `password` keyed with `salt`.
pub fn compute_hash(salt: &[u8], password: &str) -> Vec<u8> {
    let key = hmac::Key::new(hmac::HMAC_SHA512, salt);
    hmac::sign(&key, password.as_bytes()).as_ref().to_vec()
}

/// Recomputes the hash under `stored_salt` and compares it to `stored_hash`
/// in constant time.
pub fn verify_password(password: &str, stored_hash: &[u8], stored_salt: &[u8]) -> bool {
    let key = hmac::Key::new(hmac::HMAC_SHA512, stored_salt);
    hmac::verify(&key, password.as_bytes(), stored_hash).is_ok()
}

/// Performs the same work as a real verification against a fixed salt.
/// Used when the username is unknown so both login failures cost the same.
pub fn verify_against_dummy(password: &str) -> bool {
    verify_password(password, &DUMMY_HASH, &DUMMY_SALT)
}
