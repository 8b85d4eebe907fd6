use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    app::state::AppState,
    config::GlobalConfig,
    middleware::{rate_limiter::rate_limit_middleware, session::require_admin_session},
    routes::{
        auth::{check_session, login, logout},
        health::health_check,
        messages::{delete_message, get_summary, list_messages},
        projects::{create_project, delete_project, list_projects, update_project},
        public::{list_public_projects, submit_contact},
    },
    utils::rate_limiter::RateLimiter,
};

#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub config: GlobalConfig,
    pub rate_limiter: RateLimiter,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Portfolio Admin API", version = "1.0.0"),
    paths(
        crate::routes::health::health_check,
        crate::routes::auth::login,
        crate::routes::auth::check_session,
        crate::routes::auth::logout,
        crate::routes::messages::get_summary,
        crate::routes::messages::list_messages,
        crate::routes::messages::delete_message,
        crate::routes::projects::list_projects,
        crate::routes::projects::create_project,
        crate::routes::projects::update_project,
        crate::routes::projects::delete_project,
        crate::routes::public::list_public_projects,
        crate::routes::public::submit_contact,
    ),
    components(schemas(
        crate::models::responses::ApiResponse,
        crate::models::requests::LoginRequest,
        crate::models::message::ContactMessage,
        crate::models::message::NewContactMessage,
        crate::models::message::MessageSummary,
        crate::models::project::Project,
        crate::models::project::ProjectForm,
        crate::models::session::AuthStatus,
    ))
)]
pub struct ApiDoc;

pub fn create_api_router(context: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            context
                .config
                .server
                .cors_allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                })
                .collect::<Vec<_>>(),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::COOKIE,
            header::AUTHORIZATION,
            header::CACHE_CONTROL,
        ])
        .allow_credentials(true);

    let admin = Router::new()
        .route("/admin/summary", get(get_summary))
        .route("/admin/messages", get(list_messages))
        .route("/admin/messages/{message_id}", delete(delete_message))
        .route("/admin/projects", get(list_projects).post(create_project))
        .route(
            "/admin/projects/{project_id}",
            put(update_project).delete(delete_project),
        )
        .route_layer(from_fn_with_state(context.clone(), require_admin_session));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/auth/login",
            post(login).layer(from_fn(rate_limit_middleware)),
        )
        .route("/auth/session", get(check_session))
        .route("/auth/logout", post(logout))
        .route("/projects", get(list_public_projects))
        .route("/contacts", post(submit_contact))
        .merge(admin)
        .merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", ApiDoc::openapi()))
        .layer(Extension(context.rate_limiter.clone()))
        .layer(cors)
        .with_state(context)
}
