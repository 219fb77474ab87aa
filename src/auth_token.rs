use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token secret is too short (min {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,

    #[error("invalid token format")]
    InvalidFormat,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,

    #[error("failed to decode token payload")]
    PayloadDecode,

    #[error("failed to parse token payload")]
    PayloadParse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: String,
    pub issued_at_ms: u64,
    pub expires_at_ms: u64,
}

impl TokenClaims {
    pub fn new(subject: String, issued_at_ms: u64, expires_at_ms: u64) -> Self {
        Self {
            subject,
            issued_at_ms,
            expires_at_ms,
        }
    }

    pub fn is_expired(&self, reference_ms: u64) -> bool {
        reference_ms >= self.expires_at_ms
    }
}

/// Issues and verifies compact signed tokens of the form
/// `base64url(claims json).base64url(hmac-sha256)`. Tokens are stateless;
/// nothing is kept server-side and there is no revocation list.
#[derive(Clone)]
pub struct TokenService {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: Vec<u8>, ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::SecretTooShort);
        }

        Ok(Self {
            secret: Arc::<[u8]>::from(secret),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for the given subject, expiring one TTL after
    /// `issued_at_ms`.
    pub fn issue_for(&self, subject: &str, issued_at_ms: u64) -> Result<String, TokenError> {
        let expires_at_ms = issued_at_ms.saturating_add(self.ttl.as_millis() as u64);
        let claims = TokenClaims::new(subject.to_string(), issued_at_ms, expires_at_ms);
        self.issue(&claims)
    }

    pub fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(claims).map_err(|_| TokenError::PayloadParse)?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(payload_b64.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);
        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    /// Checks the signature first, then expiry against `reference_ms`.
    /// Returns the embedded claims on success.
    pub fn verify(&self, token: &str, reference_ms: u64) -> Result<TokenClaims, TokenError> {
        let (payload_b64, signature_b64) =
            token.split_once('.').ok_or(TokenError::InvalidFormat)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| TokenError::InvalidSignature)?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| TokenError::PayloadDecode)?;

        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::PayloadParse)?;

        if claims.subject.is_empty() || claims.is_expired(reference_ms) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| TokenError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
