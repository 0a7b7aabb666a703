//! Identity claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};

/// Wire payload embedded in every token we issue. Both token kinds carry
/// the same identity data; only the signing secret and TTL differ.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User id (users.id)
    pub sub: i64,
    /// Session version at signing time (users.jwt_version)
    pub ver: i64,
    /// Granted permission ids
    pub per: Vec<i64>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Authenticated identity attached to request extensions by the session
/// guard. Timestamps are codec concerns and are stripped here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Identity {
    pub sub: i64,
    pub ver: i64,
    pub per: Vec<i64>,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            ver: claims.ver,
            per: claims.per,
        }
    }
}
