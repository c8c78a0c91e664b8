//! Hashing and random token helpers.
//!
//! Password reset tokens are handed to the user in plain form and stored only
//! as their SHA-256 digest.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in an opaque token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a URL-safe random token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generates a token and its digest as `(token, sha256_hex(token))`.
pub fn generate_token_with_hash() -> (String, String) {
    let token = generate_token();
    let hash = sha256_hex(&token);
    (token, hash)
}
