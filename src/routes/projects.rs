use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    app::api::AppContext,
    error::AdminError,
    models::{project::ProjectForm, requests::ProjectQuery, responses::ApiResponse},
    services::projects,
};

#[utoipa::path(
    get,
    path = "/admin/projects",
    tag = "Projects",
    params(ProjectQuery),
    responses(
        (status = 200, description = "Projects, newest first, after search", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 503, description = "Failed to load projects", body = ApiResponse)
    )
)]
pub async fn list_projects(
    State(context): State<AppContext>,
    Query(query): Query<ProjectQuery>,
) -> Result<impl IntoResponse, AdminError> {
    let all = projects::load_all(context.state.projects.as_ref()).await?;
    let visible = projects::search(&all, query.search.as_deref().unwrap_or(""));

    let data = json!({
        "projects": visible,
        "count": visible.len(),
        "total": all.len(),
    });

    Ok(Json(ApiResponse::success("Projects retrieved", data)))
}

#[utoipa::path(
    post,
    path = "/admin/projects",
    tag = "Projects",
    request_body = ProjectForm,
    responses(
        (status = 201, description = "Project added", body = ApiResponse),
        (status = 400, description = "Title and description are required", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse)
    )
)]
pub async fn create_project(
    State(context): State<AppContext>,
    form: Result<Json<ProjectForm>, JsonRejection>,
) -> Result<impl IntoResponse, AdminError> {
    let Json(form) = form?;
    let state = &context.state;
    let project = projects::save(state.projects.as_ref(), state.clock.as_ref(), &form, None).await?;

    let mut response = ApiResponse::success("Project added successfully!", json!(project));
    response.code = StatusCode::CREATED.as_u16() as u32;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/projects/{project_id}",
    tag = "Projects",
    request_body = ProjectForm,
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project updated", body = ApiResponse),
        (status = 400, description = "Title and description are required", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 404, description = "No project with that id", body = ApiResponse)
    )
)]
pub async fn update_project(
    State(context): State<AppContext>,
    Path(project_id): Path<String>,
    form: Result<Json<ProjectForm>, JsonRejection>,
) -> Result<impl IntoResponse, AdminError> {
    let Json(form) = form?;
    let state = &context.state;
    let project = projects::save(
        state.projects.as_ref(),
        state.clock.as_ref(),
        &form,
        Some(&project_id),
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "Project updated successfully!",
        json!(project),
    )))
}

#[utoipa::path(
    delete,
    path = "/admin/projects/{project_id}",
    tag = "Projects",
    params(
        ("project_id" = String, Path, description = "Project id")
    ),
    responses(
        (status = 200, description = "Project deleted", body = ApiResponse),
        (status = 401, description = "Not signed in", body = ApiResponse),
        (status = 404, description = "No project with that id", body = ApiResponse)
    )
)]
pub async fn delete_project(
    State(context): State<AppContext>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AdminError> {
    projects::delete(context.state.projects.as_ref(), &project_id).await?;

    Ok(Json(ApiResponse::success(
        "Project deleted successfully!",
        json!({ "id": project_id }),
    )))
}
