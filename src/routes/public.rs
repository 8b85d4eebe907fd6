use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    app::api::AppContext,
    error::AdminError,
    models::{
        message::NewContactMessage, project::CategoryFilter, requests::PublicProjectQuery,
        responses::ApiResponse,
    },
    services::{messages, projects},
};

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Public",
    params(PublicProjectQuery),
    responses(
        (status = 200, description = "Stored projects followed by the showcase entries", body = ApiResponse),
        (status = 400, description = "Unknown category", body = ApiResponse)
    )
)]
pub async fn list_public_projects(
    State(context): State<AppContext>,
    Query(query): Query<PublicProjectQuery>,
) -> Result<impl IntoResponse, AdminError> {
    let category = query
        .category
        .as_deref()
        .unwrap_or("All")
        .parse::<CategoryFilter>()
        .map_err(|e| AdminError::validation("category", e))?;

    let listing = projects::public_listing(context.state.projects.as_ref(), category).await;

    Ok(Json(ApiResponse::success(
        "Projects retrieved",
        json!({ "projects": listing, "count": listing.len() }),
    )))
}

#[utoipa::path(
    post,
    path = "/contacts",
    tag = "Public",
    request_body = NewContactMessage,
    responses(
        (status = 201, description = "Message received", body = ApiResponse),
        (status = 400, description = "A required field is blank", body = ApiResponse),
        (status = 503, description = "Failed to send message", body = ApiResponse)
    )
)]
pub async fn submit_contact(
    State(context): State<AppContext>,
    draft: Result<Json<NewContactMessage>, JsonRejection>,
) -> Result<impl IntoResponse, AdminError> {
    let Json(draft) = draft?;
    let state = &context.state;
    let stored = messages::submit(state.messages.as_ref(), state.clock.as_ref(), draft).await?;
    tracing::info!("New contact message {} via {}", stored.id, stored.contact_method);

    let mut response = ApiResponse::success("Message sent successfully!", json!({ "id": stored.id }));
    response.code = StatusCode::CREATED.as_u16() as u32;

    Ok((StatusCode::CREATED, Json(response)))
}
