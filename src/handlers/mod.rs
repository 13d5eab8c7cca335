pub mod health;
pub mod signer;
pub mod viewer;

pub use health::*;
pub use signer::*;
pub use viewer::*;

use crate::responses::ApiResponse;
use crate::utils::AuthError;
use worker::{Response, Result};

/// Render an error as a JSON `ApiResponse` with the error's status code
pub fn error_response(err: &AuthError) -> Result<Response> {
    crate::utils::logger::logger().add_error(
        err,
        Some(&serde_json::json!({ "error_code": err.error_code })),
    );
    Ok(Response::from_json(&ApiResponse::<()>::from_error(err))?.with_status(err.status_code()))
}
