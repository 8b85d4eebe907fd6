use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    app::api::AppContext,
    config::SessionConfig,
    models::{
        responses::ApiResponse,
        session::{AuthCheck, UnauthorizedReason},
    },
    services::session::{clear_session_cookie, token_from_headers},
};

/// Gate for `/admin/*`. Authenticated requests carry the `Session` as an
/// extension; everything else gets a 401 with the home-page redirect hint
/// and a cleared cookie.
pub async fn require_admin_session(
    State(context): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = token_from_headers(req.headers(), &context.config.session.cookie_name);

    match context.state.sessions.check(token.as_deref()).await {
        AuthCheck::Authenticated(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        AuthCheck::Unauthorized(reason) => {
            tracing::debug!("Rejected {} {}: {:?}", req.method(), req.uri().path(), reason);
            unauthorized_response(&context.config.session, reason)
        }
    }
}

pub fn unauthorized_response(config: &SessionConfig, reason: UnauthorizedReason) -> Response {
    let body = ApiResponse::failure("Session is missing or expired", 401).with_data(json!({
        "status": "unauthorized",
        "reason": reason,
        "redirect_to": "/",
        "redirect_after_secs": config.unauthorized_redirect_secs,
    }));

    let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    if let Ok(cookie) = HeaderValue::from_str(&clear_session_cookie(config)) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}
