//! One-time tokens
//!
//! A token is `R + sha1_hex(method + ":" + secret_key + ":" + R)` where `R` is
//! six random lowercase hex digits. The service recomputes the hash with its
//! copy of the secret key, so the secret itself never leaves the client.

use crate::types::SessionState;
use rand::Rng;
use sha1::{Digest, Sha1};

/// Length of the random prefix
pub const RANDOM_PREFIX_LEN: usize = 6;

/// Total token length: random prefix plus a SHA-1 hex digest
pub const TOKEN_LEN: usize = RANDOM_PREFIX_LEN + 40;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Generate a fresh one-time token for `method`
pub fn generate_token(session: &SessionState, method: &str) -> String {
    let mut rng = rand::thread_rng();
    let prefix: String = (0..RANDOM_PREFIX_LEN)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect();

    let hash = token_hash(method, &session.secret_key, &prefix);
    prefix + &hash
}

/// Check that `token` was produced for `method` with this session's secret key
pub fn verify_token(session: &SessionState, method: &str, token: &str) -> bool {
    if token.len() != TOKEN_LEN || !token.is_ascii() {
        return false;
    }
    let (prefix, hash) = token.split_at(RANDOM_PREFIX_LEN);
    prefix.bytes().all(|b| HEX_DIGITS.contains(&b))
        && token_hash(method, &session.secret_key, prefix) == hash
}

fn token_hash(method: &str, secret_key: &str, prefix: &str) -> String {
    hex::encode(Sha1::digest(
        format!("{}:{}:{}", method, secret_key, prefix).as_bytes(),
    ))
}
