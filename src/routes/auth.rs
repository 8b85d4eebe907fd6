use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    app::api::AppContext,
    error::AdminError,
    middleware::session::unauthorized_response,
    models::{
        credential::ClientInfo, requests::LoginRequest, responses::ApiResponse,
        session::AuthCheck,
    },
    services::{
        auth,
        session::{clear_session_cookie, session_cookie, token_from_headers},
    },
};

fn with_cookie(mut response: Response, cookie: &str) -> Result<Response, AdminError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AdminError::Internal(format!("invalid cookie header: {e}")))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created; cookie set", body = ApiResponse),
        (status = 400, description = "Password missing or too short", body = ApiResponse),
        (status = 401, description = "Invalid password", body = ApiResponse),
        (status = 429, description = "Too many login attempts", body = ApiResponse)
    )
)]
pub async fn login(
    State(context): State<AppContext>,
    Extension(client): Extension<ClientInfo>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AdminError> {
    let Json(payload) = payload?;
    let (session, token) = auth::login(&context.state, &payload.password, &client).await?;

    let data = json!({
        "session_id": session.id,
        "login_at": session.login_at,
        "expires_at": session.expires_at(context.state.sessions.ttl()),
        "redirect_to": "/dashboard",
        "redirect_after_ms": context.config.session.login_redirect_delay_ms,
    });

    let response = Json(ApiResponse::success("Login successful", data)).into_response();
    with_cookie(response, &session_cookie(&context.config.session, &token))
}

#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Auth",
    responses(
        (status = 200, description = "Session is valid", body = ApiResponse),
        (status = 401, description = "Session missing or expired; redirect hint included", body = ApiResponse)
    )
)]
pub async fn check_session(State(context): State<AppContext>, headers: HeaderMap) -> Response {
    let token = token_from_headers(&headers, &context.config.session.cookie_name);

    match context.state.sessions.check(token.as_deref()).await {
        AuthCheck::Authenticated(session) => {
            let data = json!({
                "status": "authenticated",
                "session_id": session.id,
                "login_at": session.login_at,
                "expires_at": session.expires_at(context.state.sessions.ttl()),
            });
            (
                StatusCode::OK,
                Json(ApiResponse::success("Session is valid", data)),
            )
                .into_response()
        }
        AuthCheck::Unauthorized(reason) => unauthorized_response(&context.config.session, reason),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session revoked; cookie cleared", body = ApiResponse)
    )
)]
pub async fn logout(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, AdminError> {
    let token = token_from_headers(&headers, &context.config.session.cookie_name);
    let revoked = auth::logout(&context.state, token.as_deref()).await;
    if revoked {
        tracing::info!("Admin logged out");
    }

    let data = json!({
        "revoked": revoked,
        "redirect_to": "/secret-login",
    });
    let response = Json(ApiResponse::success("Logged out", data)).into_response();
    with_cookie(response, &clear_session_cookie(&context.config.session))
}
