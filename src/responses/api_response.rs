use crate::utils::AuthError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub timestamp: u64,
}

fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
            timestamp: now_millis(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            error_code: None,
            timestamp: now_millis(),
        }
    }

    pub fn from_error(err: &AuthError) -> ApiResponse<()> {
        ApiResponse {
            error_code: err.error_code.clone(),
            ..ApiResponse::<()>::error(err.message.clone())
        }
    }
}
