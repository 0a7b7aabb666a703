//! Session guard: the per-request authentication state machine.
//!
//! Given the access and refresh tokens from the request cookies, decides
//! between three outcomes: authenticated as-is, authenticated with a
//! freshly minted access token, or rejected. A token is only ever trusted
//! after its embedded session version is checked against the directory
//! record, so bumping `jwt_version` invalidates everything previously
//! issued. Renewal is stateless recomputation; nothing is written back.

use std::time::SystemTime;

use thiserror::Error;
use tracing::debug;

use crate::auth::claims::{Claims, Identity};
use crate::auth::codec::TokenError;
use crate::directory::{DirectoryError, UserDirectory};
use crate::state::security_config::SecurityConfig;

#[derive(Debug)]
pub struct SessionOutcome {
    pub identity: Identity,
    /// Set when the access token was renewed from the refresh token; the
    /// middleware turns it into a Set-Cookie on the response.
    pub renewed_access: Option<String>,
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("request is not authenticated")]
    Unauthenticated {
        /// Whether the rejection must also clear both auth cookies.
        clear_cookies: bool,
    },
    /// Storage failure. Surfaced as a server error, never as a 401, so an
    /// outage cannot masquerade as an auth failure.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("failed to mint replacement access token: {0}")]
    Codec(#[from] TokenError),
}

/// Evaluate one request. Branch order is strict:
///
/// 1. neither token present -> unauthenticated, cookies untouched
/// 2. access token verifies -> validate version against the directory
/// 3. access token missing/malformed/expired -> refresh path, which mints
///    a new access token after re-validating the refresh claims against
///    the current directory record
pub async fn authenticate(
    directory: &dyn UserDirectory,
    security: &SecurityConfig,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> Result<SessionOutcome, GuardError> {
    if access_token.is_none() && refresh_token.is_none() {
        return Err(GuardError::Unauthenticated {
            clear_cookies: false,
        });
    }

    if let Some(token) = access_token {
        match security.access_codec().verify(token) {
            Ok(claims) => {
                let identity = validate_against_directory(directory, claims).await?;
                return Ok(SessionOutcome {
                    identity,
                    renewed_access: None,
                });
            }
            // Malformed, expired or tampered access tokens fall through to
            // the refresh path. A version mismatch does not: it is only
            // detected after a successful verify, above.
            Err(err) => debug!(error = %err, "access token rejected, trying refresh"),
        }
    }

    let token = refresh_token.ok_or(GuardError::Unauthenticated {
        clear_cookies: true,
    })?;

    let claims = security.refresh_codec().verify(token).map_err(|err| {
        debug!(error = %err, "refresh token rejected");
        GuardError::Unauthenticated {
            clear_cookies: true,
        }
    })?;

    // The refresh claims are always re-validated against the current
    // directory record before any new access token is minted.
    let identity = validate_against_directory(directory, claims).await?;

    let renewed = security
        .access_codec()
        .sign(&identity, SystemTime::now())?;

    Ok(SessionOutcome {
        identity,
        renewed_access: Some(renewed),
    })
}

async fn validate_against_directory(
    directory: &dyn UserDirectory,
    claims: Claims,
) -> Result<Identity, GuardError> {
    let user = directory.find_by_id(claims.sub).await?;

    let user = user.ok_or(GuardError::Unauthenticated {
        clear_cookies: true,
    })?;

    if user.jwt_version != claims.ver {
        // Session was invalidated server-side.
        return Err(GuardError::Unauthenticated {
            clear_cookies: true,
        });
    }

    Ok(Identity {
        sub: claims.sub,
        ver: user.jwt_version,
        per: claims.per,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    use async_trait::async_trait;

    use super::{authenticate, GuardError};
    use crate::auth::claims::Identity;
    use crate::directory::{CredentialRecord, DirectoryError, UserDirectory, UserRecord};
    use crate::state::security_config::SecurityConfig;

    #[derive(Default)]
    struct FakeDirectory {
        users: Mutex<HashMap<i64, UserRecord>>,
        fail: Mutex<bool>,
    }

    impl FakeDirectory {
        fn with_user(id: i64, jwt_version: i64) -> Self {
            let dir = Self::default();
            dir.users.lock().unwrap().insert(
                id,
                UserRecord {
                    id,
                    username: format!("user{id}"),
                    jwt_version,
                },
            );
            dir
        }

        fn bump_version(&self, id: i64) {
            self.users
                .lock()
                .unwrap()
                .get_mut(&id)
                .expect("user exists")
                .jwt_version += 1;
        }

        fn fail_lookups(&self) {
            *self.fail.lock().unwrap() = true;
        }
    }

    #[async_trait]
    impl UserDirectory for FakeDirectory {
        async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, DirectoryError> {
            if *self.fail.lock().unwrap() {
                return Err(DirectoryError::Storage("fake outage".to_string()));
            }
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_credentials(
            &self,
            _username: &str,
        ) -> Result<Option<CredentialRecord>, DirectoryError> {
            unimplemented!("not used by the guard")
        }

        async fn permissions(&self, _user_id: i64) -> Result<Vec<i64>, DirectoryError> {
            unimplemented!("not used by the guard")
        }
    }

    fn security() -> SecurityConfig {
        SecurityConfig::for_tests()
    }

    fn identity() -> Identity {
        Identity {
            sub: 1,
            ver: 1,
            per: vec![1],
        }
    }

    fn mint_access(security: &SecurityConfig, at: SystemTime) -> String {
        security.access_codec().sign(&identity(), at).unwrap()
    }

    fn mint_refresh(security: &SecurityConfig, at: SystemTime) -> String {
        security.refresh_codec().sign(&identity(), at).unwrap()
    }

    fn expired_at(security: &SecurityConfig) -> SystemTime {
        // Past the TTL plus jsonwebtoken's default leeway.
        SystemTime::now() - Duration::from_secs(security.access.ttl_secs as u64 + 300)
    }

    #[actix_web::test]
    async fn no_tokens_rejects_without_clearing() {
        let dir = FakeDirectory::with_user(1, 1);

        let err = authenticate(&dir, &security(), None, None).await.unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated {
                clear_cookies: false
            }
        ));
    }

    #[actix_web::test]
    async fn valid_access_token_authenticates_without_renewal() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        let access = mint_access(&security, SystemTime::now());

        let outcome = authenticate(&dir, &security, Some(&access), None)
            .await
            .unwrap();

        assert_eq!(outcome.identity, identity());
        assert!(outcome.renewed_access.is_none());
    }

    #[actix_web::test]
    async fn version_mismatch_on_access_path_clears_cookies() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        let access = mint_access(&security, SystemTime::now());
        let refresh = mint_refresh(&security, SystemTime::now());

        dir.bump_version(1);

        let err = authenticate(&dir, &security, Some(&access), Some(&refresh))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated { clear_cookies: true }
        ));
    }

    #[actix_web::test]
    async fn unknown_user_clears_cookies() {
        let security = security();
        let dir = FakeDirectory::default();
        let access = mint_access(&security, SystemTime::now());

        let err = authenticate(&dir, &security, Some(&access), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated { clear_cookies: true }
        ));
    }

    #[actix_web::test]
    async fn expired_access_with_valid_refresh_renews() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        let access = mint_access(&security, expired_at(&security));
        let refresh = mint_refresh(&security, SystemTime::now());

        let outcome = authenticate(&dir, &security, Some(&access), Some(&refresh))
            .await
            .unwrap();

        assert_eq!(outcome.identity, identity());

        // The renewed token verifies with the access codec and carries the
        // refresh token's claims.
        let renewed = outcome.renewed_access.expect("renewed access token");
        let claims = security.access_codec().verify(&renewed).unwrap();
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.ver, 1);
        assert_eq!(claims.per, vec![1]);
    }

    #[actix_web::test]
    async fn tampered_access_without_refresh_clears_cookies() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        // Flip the last signature character so the MAC no longer matches.
        let mut access = mint_access(&security, SystemTime::now());
        match access.pop() {
            Some('x') => access.push('y'),
            _ => access.push('x'),
        }

        let err = authenticate(&dir, &security, Some(&access), None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated { clear_cookies: true }
        ));
    }

    #[actix_web::test]
    async fn refresh_token_is_not_accepted_as_access_token() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        // A refresh token presented in the access slot must not authorize
        // directly; with no refresh cookie the request is rejected.
        let refresh = mint_refresh(&security, SystemTime::now());

        let err = authenticate(&dir, &security, Some(&refresh), None)
            .await
            .unwrap_err();

        assert!(matches!(err, GuardError::Unauthenticated { .. }));
    }

    #[actix_web::test]
    async fn both_tokens_expired_clears_cookies() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        let long_ago =
            SystemTime::now() - Duration::from_secs(security.refresh.ttl_secs as u64 + 300);
        let access = mint_access(&security, long_ago);
        let refresh = mint_refresh(&security, long_ago);

        let err = authenticate(&dir, &security, Some(&access), Some(&refresh))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated { clear_cookies: true }
        ));
    }

    #[actix_web::test]
    async fn stale_refresh_version_never_mints() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        let access = mint_access(&security, expired_at(&security));
        let refresh = mint_refresh(&security, SystemTime::now());

        dir.bump_version(1);

        let err = authenticate(&dir, &security, Some(&access), Some(&refresh))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GuardError::Unauthenticated { clear_cookies: true }
        ));
    }

    #[actix_web::test]
    async fn storage_error_is_not_unauthenticated() {
        let security = security();
        let dir = FakeDirectory::with_user(1, 1);
        dir.fail_lookups();
        let access = mint_access(&security, SystemTime::now());

        let err = authenticate(&dir, &security, Some(&access), None)
            .await
            .unwrap_err();

        assert!(matches!(err, GuardError::Directory(_)));
    }
}
