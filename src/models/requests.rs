use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, IntoParams, Default)]
pub struct MessageQuery {
    /// Case-insensitive search over name, email, subject and message.
    pub search: Option<String>,
    /// `all`, `email`, `phone` or `both`.
    pub method: Option<String>,
}

#[derive(Deserialize, IntoParams, Default)]
pub struct ProjectQuery {
    pub search: Option<String>,
}

#[derive(Deserialize, IntoParams, Default)]
pub struct PublicProjectQuery {
    /// A category label, or `All`.
    pub category: Option<String>,
}
