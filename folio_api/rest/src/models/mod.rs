use serde::{Deserialize, Serialize};

pub mod contact;

/// Body of every json response except the health check.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResult<E = ()> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<E>>,
}

impl<E> ApiResult<E> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}
