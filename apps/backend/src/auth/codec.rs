//! Token codec: signs and verifies identity claims with a shared secret.
//!
//! Pure functions over `jsonwebtoken`, no I/O. Two codec instances exist
//! at runtime, one per token kind, each with its own secret and TTL so an
//! access token can never be replayed as a refresh token or vice versa.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::auth::claims::{Claims, Identity};

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("token cannot be parsed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature does not match")]
    InvalidSignature,
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// HS256 signer/verifier bound to one secret and one TTL.
#[derive(Debug, Clone)]
pub struct JwtCodec {
    secret: Vec<u8>,
    ttl_secs: i64,
    algorithm: Algorithm,
}

impl JwtCodec {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
            algorithm: Algorithm::HS256,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Serialize `identity` plus issued-at/expiry fields and sign it.
    ///
    /// `now` is passed in rather than read internally so callers (and
    /// tests) control the embedded timestamps.
    pub fn sign(&self, identity: &Identity, now: SystemTime) -> Result<String, TokenError> {
        if self.ttl_secs <= 0 {
            return Err(TokenError::Encoding(format!(
                "ttl must be positive, got {}",
                self.ttl_secs
            )));
        }

        let iat = now
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Encoding("system clock before epoch".to_string()))?
            .as_secs() as i64;

        let claims = Claims {
            sub: identity.sub,
            ver: identity.ver,
            per: identity.per.clone(),
            iat,
            exp: iat + self.ttl_secs,
        };

        encode(
            &Header::new(self.algorithm),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Check signature integrity and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        // Default Validation already checks exp; pin the algorithm.
        let validation = Validation::new(self.algorithm);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })
    }
}
