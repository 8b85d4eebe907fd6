use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{app::api::AppContext, models::responses::ApiResponse};

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is healthy", body = ApiResponse),
    )
)]
pub async fn health_check(State(context): State<AppContext>) -> impl IntoResponse {
    let data = json!({
        "status": "healthy",
        "timestamp": context.state.clock.now(),
        "active_sessions": context.state.sessions.get_session_count().await,
    });

    (
        StatusCode::OK,
        Json(ApiResponse::success("Server is healthy.", data)),
    )
}
