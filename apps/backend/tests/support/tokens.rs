//! Token minting helpers for tests that need tokens the login endpoint
//! would not hand out (expired, tampered, version-stale).

use std::time::{Duration, SystemTime};

use wicket::{Identity, SecurityConfig};

pub fn identity(sub: i64, permissions: Vec<i64>) -> Identity {
    Identity {
        sub,
        ver: 1,
        per: permissions,
    }
}

pub fn mint_access(security: &SecurityConfig, identity: &Identity) -> String {
    security
        .access_codec()
        .sign(identity, SystemTime::now())
        .unwrap()
}

pub fn mint_refresh(security: &SecurityConfig, identity: &Identity) -> String {
    security
        .refresh_codec()
        .sign(identity, SystemTime::now())
        .unwrap()
}

/// Access token whose expiry is safely past TTL plus validation leeway.
pub fn mint_expired_access(security: &SecurityConfig, identity: &Identity) -> String {
    let past = SystemTime::now() - Duration::from_secs(security.access.ttl_secs as u64 + 300);
    security.access_codec().sign(identity, past).unwrap()
}

pub fn mint_expired_refresh(security: &SecurityConfig, identity: &Identity) -> String {
    let past = SystemTime::now() - Duration::from_secs(security.refresh.ttl_secs as u64 + 300);
    security.refresh_codec().sign(identity, past).unwrap()
}

/// Flip the last signature character so the MAC no longer matches.
pub fn tamper(token: &str) -> String {
    let mut tampered: String = token[..token.len() - 1].to_string();
    match token.chars().last() {
        Some('x') => tampered.push('y'),
        _ => tampered.push('x'),
    }
    tampered
}
