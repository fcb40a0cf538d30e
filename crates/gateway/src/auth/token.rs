//! Constant-time comparison of presented tokens against the dashboard secret.
//!
//! Both the configured secret and each presented token are reduced to an
//! HMAC-SHA256 tag under a per-process random key. Tags are compared with
//! [`Mac::verify_slice`], which does not short-circuit on the first differing
//! byte, so response timing does not reveal how much of a guess was right.

use std::sync::Arc;

use hmac::{digest::InvalidLength, Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::config::Secret;

type HmacSha256 = Hmac<Sha256>;

/// HMAC key length, matching the SHA-256 output size.
const KEY_LEN: usize = 32;

/// Checks presented tokens against the dashboard secret.
///
/// Cheap to clone; the key and expected tag are shared.
#[derive(Clone)]
pub struct TokenVerifier {
    key: Arc<[u8]>,
    expected: Arc<[u8]>,
}

impl TokenVerifier {
    /// Build a verifier for `secret` with a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLength`] if the MAC rejects the key, which HMAC never
    /// does.
    pub fn new(secret: &Secret) -> Result<Self, InvalidLength> {
        let key = random_key();
        let expected = tag(&key, secret.expose())?.finalize().into_bytes();
        Ok(Self {
            key: Arc::from(key.as_slice()),
            expected: Arc::from(expected.as_slice()),
        })
    }

    /// Returns `true` if `presented` is exactly the dashboard secret.
    pub fn matches(&self, presented: &str) -> bool {
        match tag(&self.key[..], presented) {
            Ok(mac) => mac.verify_slice(&self.expected).is_ok(),
            Err(_) => false,
        }
    }
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenVerifier([REDACTED])")
    }
}

/// 32 bytes of OS randomness, drawn from two v4 UUIDs.
fn random_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    key[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    key[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    key
}

fn tag(key: &[u8], value: &str) -> Result<HmacSha256, InvalidLength> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(value.as_bytes());
    Ok(mac)
}
