use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[schema(example = 200)]
    pub code: u32,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: if data.is_null() { None } else { Some(data) },
            code: 200,
        }
    }

    pub fn failure(message: impl Into<String>, code: u32) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            code,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = if data.is_null() { None } else { Some(data) };
        self
    }
}
