use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

/// Lifetime assumed when the provider does not send `expires_in`.
pub const DEFAULT_EXPIRES_IN: i64 = 3600;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_alphanumeric(32)
}

pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Converts a relative lifetime into an absolute Unix timestamp.
pub fn expires_at(captured_at: i64, expires_in: Option<i64>) -> i64 {
    captured_at + expires_in.unwrap_or(DEFAULT_EXPIRES_IN)
}
