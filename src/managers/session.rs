use std::{collections::HashMap, sync::Arc};

use chrono::Duration;
use tokio::sync::RwLock;

use crate::{
    clock::Clock,
    models::session::{AuthCheck, Session, UnauthorizedReason},
    utils::token::{SessionClaims, TokenSigner},
};

/// Server-side registry of admin sessions. Tokens handed to clients are
/// signed; a token only authenticates while its session is still registered
/// and younger than the ttl.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    signer: TokenSigner,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(signer: TokenSigner, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            signer,
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Mints a session for the credential `user_id` and returns it with its token.
    pub async fn create_session(&self, user_id: String) -> (Session, String) {
        let session = Session::new(user_id, self.clock.now());
        let token = self.signer.sign(&SessionClaims {
            sid: session.id.clone(),
            uid: session.user_id.clone(),
            iat: session.login_at,
        });

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());

        (session, token)
    }

    pub async fn check(&self, token: Option<&str>) -> AuthCheck {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return AuthCheck::Unauthorized(UnauthorizedReason::MissingToken);
        };

        let Some(claims) = self.signer.verify(token) else {
            return AuthCheck::Unauthorized(UnauthorizedReason::InvalidToken);
        };

        let mut sessions = self.sessions.write().await;

        let Some(session) = sessions.get(&claims.sid).cloned() else {
            return AuthCheck::Unauthorized(UnauthorizedReason::UnknownSession);
        };

        if session.user_id != claims.uid || session.login_at != claims.iat {
            return AuthCheck::Unauthorized(UnauthorizedReason::InvalidToken);
        }

        if !session.is_valid_at(self.clock.now(), self.ttl) {
            sessions.remove(&claims.sid);
            tracing::info!(
                "Session {} expired",
                claims.sid.chars().take(8).collect::<String>()
            );
            return AuthCheck::Unauthorized(UnauthorizedReason::Expired);
        }

        AuthCheck::Authenticated(session)
    }

    /// Removes the session behind `token`, if any. Returns whether one was removed.
    pub async fn revoke(&self, token: &str) -> bool {
        match self.signer.verify(token) {
            Some(claims) => self.sessions.write().await.remove(&claims.sid).is_some(),
            None => false,
        }
    }

    pub async fn cleanup_expired_sessions(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write().await;
        let mut removed = Vec::new();

        sessions.retain(|session_id, session| {
            if session.is_valid_at(now, self.ttl) {
                true
            } else {
                removed.push(session_id.clone());
                false
            }
        });

        removed
    }

    pub async fn get_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
