use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AdminError, models::credential::ClientInfo, utils::rate_limiter::RateLimiter};

/// Throttles login attempts per client IP and attaches a `ClientInfo` for
/// the audit log. Requests without connection info share one bucket.
pub async fn rate_limit_middleware(mut req: Request, next: Next) -> Response {
    let Some(rate_limiter) = req.extensions().get::<RateLimiter>() else {
        return AdminError::Internal("rate limiter missing from extensions".into())
            .into_response();
    };

    let addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_key = rate_limiter.get_client_key(addr.as_ref());

    if !rate_limiter.check_rate_limit(&client_key) {
        tracing::warn!("Login throttled for {}", client_key);
        return AdminError::RateLimited.into_response();
    }

    let client = ClientInfo {
        user_agent: req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
        ip: addr.map(|a| a.ip().to_string()),
    };
    req.extensions_mut().insert(client);

    next.run(req).await
}
