//! Session service for the shared-credential login gate.
//!
//! A successful login issues a [`Session`] that stays valid until it is
//! logged out. There is no expiry and no per-user identity.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use pushboard_common::{AppError, AppResult, IdGenerator, config::AuthConfig};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

/// Session service.
#[derive(Clone)]
pub struct SessionService {
    credentials: AuthConfig,
    /// Open sessions by token. Entries leave only through `logout`; there is
    /// no expiry, so each login adds one entry for the process lifetime.
    active: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    id_gen: IdGenerator,
}

impl SessionService {
    /// Create a session service accepting `credentials`.
    #[must_use]
    pub fn new(credentials: AuthConfig) -> Self {
        Self {
            credentials,
            active: Arc::new(RwLock::new(HashMap::new())),
            id_gen: IdGenerator::new(),
        }
    }

    /// Check a credential pair and open a session.
    ///
    /// A blank username or password never matches, even if the configured
    /// pair is blank too.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.is_empty()
            || password.is_empty()
            || username != self.credentials.username || password != self.credentials.password {
            debug!(username = %username, "Login rejected");
            return Err(AppError::AuthMismatch);
        }

        let session = Session {
            token: self.id_gen.generate_token(),
            created_at: Utc::now(),
        };
        self.active
            .write()
            .await
            .insert(session.token.clone(), session.created_at);
        info!("Session opened");

        Ok(session)
    }

    /// Close a session. Unknown sessions are ignored.
    pub async fn logout(&self, session: &Session) {
        if self.active.write().await.remove(&session.token).is_some() {
            info!("Session closed");
        }
    }

    /// Whether `session` is open.
    pub async fn is_valid(&self, session: &Session) -> bool {
        self.active.read().await.contains_key(&session.token)
    }

    /// The open session for a presented token, if any.
    pub async fn resolve(&self, token: &str) -> Option<Session> {
        self.active
            .read()
            .await
            .get(token)
            .map(|created_at| Session {
                token: token.to_string(),
                created_at: *created_at,
            })
    }

    /// Number of open sessions.
    pub async fn active_count(&self) -> usize {
        self.active.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        SessionService::new(AuthConfig {
            username: "admin".to_string(),
            password: "secret".to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_with_matching_credentials() {
        let sessions = service();

        let session = sessions.login("admin", "secret").await.unwrap();

        assert!(sessions.is_valid(&session).await);
        // Still valid on later checks without logging in again
        let presented = sessions.resolve(&session.token).await.unwrap();
        assert!(sessions.is_valid(&presented).await);
    }

    #[tokio::test]
    async fn test_login_with_wrong_credentials() {
        let sessions = service();

        for (user, pass) in [("admin", "wrong"), ("root", "secret"), ("", "")] {
            let err = sessions.login(user, pass).await.unwrap_err();
            assert!(matches!(err, AppError::AuthMismatch));
        }
        assert_eq!(sessions.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_credentials_never_match() {
        let sessions = SessionService::new(AuthConfig {
            username: String::new(),
            password: String::new(),
        });

        let err = sessions.login("", "").await.unwrap_err();
        assert!(matches!(err, AppError::AuthMismatch));
        assert_eq!(sessions.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_sessions_accumulate_until_logout() {
        let sessions = service();
        let mut opened = Vec::new();
        for _ in 0..3 {
            opened.push(sessions.login("admin", "secret").await.unwrap());
        }
        assert_eq!(sessions.active_count().await, 3);

        for session in &opened {
            sessions.logout(session).await;
        }
        assert_eq!(sessions.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let sessions = service();
        let session = sessions.login("admin", "secret").await.unwrap();

        sessions.logout(&session).await;

        assert!(!sessions.is_valid(&session).await);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let sessions = service();
        let first = sessions.login("admin", "secret").await.unwrap();
        let second = sessions.login("admin", "secret").await.unwrap();

        assert_ne!(first.token, second.token);
        sessions.logout(&first).await;
        assert!(sessions.is_valid(&second).await);
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let sessions = service();
        let unknown = Session {
            token: "nope".to_string(),
            created_at: Utc::now(),
        };
        assert!(!sessions.is_valid(&unknown).await);
        assert!(sessions.resolve("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_returns_issued_session() {
        let sessions = service();
        let session = sessions.login("admin", "secret").await.unwrap();

        assert_eq!(sessions.resolve(&session.token).await, Some(session));
    }
}
