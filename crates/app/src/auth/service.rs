//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    auth::{
        AuthServiceError, IssuedSession, SessionTokenVersion,
        models::{NewSession, SessionUuid},
        format_session_token, generate_session_secret, parse_session_token,
        repository::PgSessionsRepository,
        session_verifier, verifiers_match,
    },
    database::Db,
    domain::accounts::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgSessionsRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSessionsRepository::new(),
        }
    }

    /// Issue a new session for the given user. The raw token is only ever
    /// available on the returned value.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_session(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid, version, &secret);

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user,
                    version,
                    token_hash: session_verifier(session_uuid, version, user, &secret),
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        debug!(session = %session_uuid, user = %user, "issued session");

        Ok(IssuedSession { token, metadata })
    }

    /// Revoke a session by UUID. Returns `true` if the session was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, session: SessionUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }

    async fn touch_session(&self, session: SessionUuid, now: Timestamp) -> Result<(), sqlx::Error> {
        let mut tx = self.db.begin().await?;

        self.repository.touch_session(&mut tx, session, now).await?;

        tx.commit().await
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_session(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_session_token(token).map_err(|_| AuthServiceError::Unauthenticated)?;

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, parsed.session_uuid, parsed.version, now)
            .await?
            .ok_or(AuthServiceError::Unauthenticated)?;

        tx.commit().await?;

        if session.version != parsed.version {
            return Err(AuthServiceError::Unauthenticated);
        }

        let verifier = session_verifier(
            parsed.session_uuid,
            parsed.version,
            session.user_uuid,
            &parsed.secret,
        );

        if !verifiers_match(&session.token_hash, &verifier) {
            return Err(AuthServiceError::Unauthenticated);
        }

        if let Err(error) = self.touch_session(parsed.session_uuid, now).await {
            warn!(session = %parsed.session_uuid, %error, "failed to record session use");
        }

        Ok(session.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolves a bearer token to the user it signs in. Malformed, unknown,
    /// revoked, expired and mismatching tokens are all `Unauthenticated`.
    async fn authenticate_session(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<UserUuid, AuthServiceError>;
}
