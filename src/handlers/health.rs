use crate::responses::ApiResponse;
use crate::utils::{SignerConfig, WorkerConfig};
use worker::{Env, Request, Response, Result};

/// Basic health check endpoint
pub async fn handle_health_check(
    _req: Request,
    env: Env,
    config: &WorkerConfig,
) -> Result<Response> {
    let response = ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "service": "cf-auth-edge",
        "version": env!("CARGO_PKG_VERSION"),
        "signer_configured": SignerConfig::from_env(&env).is_ok(),
        "origin_configured": config.origin_url.is_some(),
    }));
    Response::from_json(&response)
}
