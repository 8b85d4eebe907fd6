use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    app::api::AppContext,
    error::AdminError,
    models::{
        message::ContactMethodFilter, requests::MessageQuery, responses::ApiResponse,
    },
    services::messages,
};

#[utoipa::path(
    get,
    path = "/admin/summary",
    tag = "Messages",
    responses(
        (status = 200, description = "Dashboard counters", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 503, description = "Failed to load dashboard data", body = ApiResponse)
    )
)]
pub async fn get_summary(
    State(context): State<AppContext>,
) -> Result<impl IntoResponse, AdminError> {
    let state = &context.state;
    let summary = messages::load_summary(
        state.messages.as_ref(),
        state.login_logs.as_ref(),
        state.clock.as_ref(),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "Dashboard summary retrieved",
        json!(summary),
    )))
}

#[utoipa::path(
    get,
    path = "/admin/messages",
    tag = "Messages",
    params(MessageQuery),
    responses(
        (status = 200, description = "Messages, newest first, after filtering", body = ApiResponse),
        (status = 400, description = "Unknown contact method filter", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 503, description = "Failed to load messages", body = ApiResponse)
    )
)]
pub async fn list_messages(
    State(context): State<AppContext>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, AdminError> {
    let method = match query.method.as_deref() {
        None | Some("") => ContactMethodFilter::All,
        Some(raw) => raw
            .parse::<ContactMethodFilter>()
            .map_err(|e| AdminError::validation("method", e))?,
    };

    let all = messages::load_all(context.state.messages.as_ref()).await?;
    let visible = messages::filter(&all, query.search.as_deref().unwrap_or(""), method);

    let data = json!({
        "messages": visible,
        "count": visible.len(),
        "total": all.len(),
    });

    Ok(Json(ApiResponse::success("Messages retrieved", data)))
}

#[utoipa::path(
    delete,
    path = "/admin/messages/{message_id}",
    tag = "Messages",
    params(
        ("message_id" = String, Path, description = "Contact message id")
    ),
    responses(
        (status = 200, description = "Message deleted", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 404, description = "No message with that id", body = ApiResponse)
    )
)]
pub async fn delete_message(
    State(context): State<AppContext>,
    Path(message_id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    messages::delete(context.state.messages.as_ref(), &message_id).await?;

    Ok(Json(ApiResponse::success(
        "Message deleted",
        json!({ "id": message_id }),
    )))
}
