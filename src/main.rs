use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use tokio::net::TcpListener;
use tokio::time::interval;

use portfolio_admin::{
    app::{
        api::{AppContext, create_api_router},
        state::AppState,
    },
    clock::SystemClock,
    config::GlobalConfig,
    models::credential::Credential,
    store::{CredentialRepository, MemoryStore},
    utils::{password::hash_password, rate_limiter::RateLimiter, token::TokenSigner},
};

const BOOTSTRAP_CREDENTIAL_ID: &str = "bootstrap-admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Portfolio Admin");

    let config = GlobalConfig::from_env()?;

    let store = match &config.store.data_file {
        Some(path) => MemoryStore::open(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open data file {}: {}", path.display(), e))?,
        None => {
            tracing::warn!("DATA_FILE not set, data lives in memory only");
            MemoryStore::new()
        }
    };

    if let Some(password) = &config.store.bootstrap_password {
        let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e))?;
        store
            .insert(Credential {
                id: BOOTSTRAP_CREDENTIAL_ID.to_string(),
                password_hash,
            })
            .await?;
        tracing::info!("Admin credential installed from ADMIN_PASSWORD");
    }

    let signer = match &config.session.secret {
        Some(secret) => TokenSigner::new(secret),
        None => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            TokenSigner::random()
        }
    };

    let state = AppState::with_store(
        store,
        signer,
        Arc::new(SystemClock),
        chrono::Duration::hours(config.session.ttl_hours),
    )
    .audit_login_attempts(config.security.audit_login_attempts);
    let rate_limiter = RateLimiter::new(config.security.login_attempts_per_minute);

    let sweep_state = state.clone();
    let sweep_limiter = rate_limiter.clone();
    let cleanup_every = Duration::from_secs(config.session.cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = interval(cleanup_every);

        loop {
            interval.tick().await;
            let expired = sweep_state.sessions.cleanup_expired_sessions().await;
            sweep_limiter.purge_stale();

            if !expired.is_empty() {
                tracing::info!("Expired {} admin sessions", expired.len());
            }
            let session_count = sweep_state.sessions.get_session_count().await;
            if session_count > 0 {
                tracing::info!("Active sessions: {}", session_count);
            }
        }
    });

    let context = AppContext {
        state,
        config: config.clone(),
        rate_limiter,
    };

    let app: Router = create_api_router(context);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Portfolio Admin running on http://{}", addr);
    tracing::info!("Session TTL: {}h", config.session.ttl_hours);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
