use crate::{
    app::state::AppState,
    error::AdminError,
    models::{
        credential::{ClientInfo, LoginLog},
        session::Session,
    },
    utils::password::verify_password,
};

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_password_input(password: &str) -> Result<(), AdminError> {
    if password.is_empty() {
        return Err(AdminError::validation("password", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AdminError::validation(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Checks `password` against every credential document and mints a session
/// for the first match. Store failures count as a failed login.
pub async fn login(
    state: &AppState,
    password: &str,
    client: &ClientInfo,
) -> Result<(Session, String), AdminError> {
    validate_password_input(password)?;

    let matched = match state.credentials.list().await {
        Ok(credentials) => credentials.into_iter().find(|credential| {
            verify_password(password, &credential.password_hash).unwrap_or_else(|e| {
                tracing::warn!("Skipping credential {}: {}", credential.id, e);
                false
            })
        }),
        Err(e) => {
            tracing::error!("Login error: {}", e);
            None
        }
    };

    let Some(credential) = matched else {
        record_attempt(state, client, None, Some("Invalid password")).await;
        return Err(AdminError::InvalidPassword);
    };

    let (session, token) = state.sessions.create_session(credential.id).await;
    record_attempt(state, client, Some(&session), None).await;

    tracing::info!(
        "Admin login succeeded, session {}",
        session.id.chars().take(8).collect::<String>()
    );

    Ok((session, token))
}

pub async fn logout(state: &AppState, token: Option<&str>) -> bool {
    match token {
        Some(token) => state.sessions.revoke(token).await,
        None => false,
    }
}

async fn record_attempt(
    state: &AppState,
    client: &ClientInfo,
    session: Option<&Session>,
    error: Option<&str>,
) {
    if !state.audit_login_attempts {
        return;
    }

    let entry = LoginLog {
        id: uuid::Uuid::new_v4().simple().to_string(),
        credential_id: session.map(|s| s.user_id.clone()),
        session_id: session.map(|s| s.id.clone()),
        login_time: state.clock.now(),
        user_agent: client.user_agent.clone(),
        client_ip: client.ip.clone(),
        success: session.is_some(),
        error: error.map(str::to_string),
    };

    if let Err(e) = state.login_logs.record(entry).await {
        tracing::warn!("Failed to log login attempt: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::{
        clock::ManualClock,
        models::credential::Credential,
        store::{CredentialRepository, MemoryStore, StoreError, StoreResult},
        utils::{password::hash_password, token::TokenSigner},
    };

    async fn state_with_password(password: &str) -> AppState {
        let store = MemoryStore::new();
        store
            .insert(Credential {
                id: "cred-1".to_string(),
                password_hash: hash_password(password).unwrap(),
            })
            .await
            .unwrap();

        AppState::with_store(
            store,
            TokenSigner::new("auth-tests"),
            Arc::new(ManualClock::new(Utc::now())),
            Duration::hours(24),
        )
    }

    #[test]
    fn rejects_short_or_empty_input() {
        assert!(matches!(
            validate_password_input(""),
            Err(AdminError::Validation { field: "password", .. })
        ));
        assert!(validate_password_input("1234567").is_err());
        assert!(validate_password_input("12345678").is_ok());
    }

    #[tokio::test]
    async fn matching_password_mints_session() {
        let state = state_with_password("letmein-please").await;
        let (session, token) = login(&state, "letmein-please", &ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(session.user_id, "cred-1");
        assert!(session.authenticated);
        assert!(state.sessions.check(Some(&token)).await.session().is_some());
    }

    #[tokio::test]
    async fn wrong_password_leaves_no_session() {
        let state = state_with_password("letmein-please").await;
        let err = login(&state, "not-the-password", &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AdminError::InvalidPassword));
        assert_eq!(state.sessions.get_session_count().await, 0);
    }

    #[tokio::test]
    async fn audit_records_both_outcomes_when_enabled() {
        let state = state_with_password("letmein-please")
            .await
            .audit_login_attempts(true);
        let client = ClientInfo {
            user_agent: Some("tests".to_string()),
            ip: Some("127.0.0.1".to_string()),
        };

        let _ = login(&state, "wrong-password", &client).await;
        login(&state, "letmein-please", &client).await.unwrap();

        assert_eq!(state.login_logs.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn audit_is_off_by_default() {
        let state = state_with_password("letmein-please").await;
        login(&state, "letmein-please", &ClientInfo::default())
            .await
            .unwrap();
        assert_eq!(state.login_logs.count().await.unwrap(), 0);
    }

    struct BrokenCredentials;

    #[async_trait]
    impl CredentialRepository for BrokenCredentials {
        async fn list(&self) -> StoreResult<Vec<Credential>> {
            Err(StoreError::Unavailable("offline".into()))
        }

        async fn insert(&self, _credential: Credential) -> StoreResult<()> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn store_failure_fails_closed() {
        let mut state = state_with_password("letmein-please").await;
        state.credentials = Arc::new(BrokenCredentials);

        let err = login(&state, "letmein-please", &ClientInfo::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidPassword));
    }

    #[tokio::test]
    async fn logout_revokes() {
        let state = state_with_password("letmein-please").await;
        let (_, token) = login(&state, "letmein-please", &ClientInfo::default())
            .await
            .unwrap();

        assert!(logout(&state, Some(&token)).await);
        assert!(state.sessions.check(Some(&token)).await.session().is_none());
        assert!(!logout(&state, None).await);
    }
}
