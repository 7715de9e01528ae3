//! Access Guard - Credential Verification
//!
//! Resolves a request credential to exactly one of {user id, Unauthorized}.
//! On failure no downstream store operation runs. Tokens are
//! `base64url(claims).base64url(mac)` with a blake3 keyed MAC over the raw
//! claims bytes; claims carry the subject and a unix-seconds expiry.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Abstract credential verifier
///
/// Implementations map an opaque credential to a stable user id or fail
/// with `Unauthorized`.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a credential and return the authenticated user id
    async fn verify(&self, credential: &str) -> DomainResult<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// Subject: the user id
    sub: String,
    /// Expiry, unix seconds
    exp: i64,
}

/// Keyed-MAC token verifier (and issuer, for tests and tooling)
pub struct MacTokenVerifier {
    key: [u8; 32],
}

impl MacTokenVerifier {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Issue a token for `user_id`, valid for `ttl_secs` from now
    pub fn issue(&self, user_id: &str, ttl_secs: i64) -> DomainResult<String> {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: chrono::Utc::now().timestamp() + ttl_secs,
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|e| DomainError::Internal(e.to_string()))?;
        let mac = blake3::keyed_hash(&self.key, &payload);
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(mac.as_bytes())
        ))
    }
}

#[async_trait]
impl TokenVerifier for MacTokenVerifier {
    async fn verify(&self, credential: &str) -> DomainResult<String> {
        let (payload_b64, mac_b64) = credential
            .split_once('.')
            .ok_or_else(|| unauthorized("Missing or malformed token"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| unauthorized("Missing or malformed token"))?;
        let mac_bytes: [u8; 32] = URL_SAFE_NO_PAD
            .decode(mac_b64)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| unauthorized("Missing or malformed token"))?;

        // blake3::Hash equality is constant-time
        let expected = blake3::keyed_hash(&self.key, &payload);
        if expected != blake3::Hash::from_bytes(mac_bytes) {
            log::warn!("token verification failed: bad signature");
            return Err(unauthorized("Invalid or expired token"));
        }

        let claims: TokenClaims = serde_json::from_slice(&payload)
            .map_err(|_| unauthorized("Missing or malformed token"))?;
        if claims.exp <= chrono::Utc::now().timestamp() {
            log::warn!("token verification failed: expired");
            return Err(unauthorized("Invalid or expired token"));
        }

        Ok(claims.sub)
    }
}

/// Extract the token from an `Authorization` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

fn unauthorized(msg: &str) -> DomainError {
    DomainError::Unauthorized(msg.to_string())
}
