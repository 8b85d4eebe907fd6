use std::sync::Arc;

use chrono::Duration;

use crate::{
    clock::Clock,
    managers::session::SessionManager,
    store::{
        CredentialRepository, LoginLogRepository, MemoryStore, MessageRepository,
        ProjectRepository,
    },
    utils::token::TokenSigner,
};

#[derive(Clone)]
pub struct AppState {
    pub messages: Arc<dyn MessageRepository>,
    pub projects: Arc<dyn ProjectRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub login_logs: Arc<dyn LoginLogRepository>,
    pub sessions: SessionManager,
    pub clock: Arc<dyn Clock>,
    pub audit_login_attempts: bool,
}

impl AppState {
    /// Every collection served by the one in-memory store.
    pub fn with_store(
        store: MemoryStore,
        signer: TokenSigner,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            messages: store.clone(),
            projects: store.clone(),
            credentials: store.clone(),
            login_logs: store,
            sessions: SessionManager::new(signer, clock.clone(), session_ttl),
            clock,
            audit_login_attempts: false,
        }
    }

    pub fn audit_login_attempts(mut self, enabled: bool) -> Self {
        self.audit_login_attempts = enabled;
        self
    }
}
