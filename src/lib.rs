use worker::*;

// Module declarations
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod services;
pub mod types;
pub mod utils;

use handlers::*;
use utils::WorkerConfig;

pub use services::authenticator::{authenticate, authenticate_event, COOKIE_NAME, HEADER_NAME};
pub use types::{ViewerEvent, ViewerRequest};
pub use utils::{AuthError, AuthResult};

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    utils::logger::set_panic_hook();

    let config = match WorkerConfig::from_env(&env) {
        Ok(config) => config,
        Err(err) => return error_response(&err),
    };
    utils::logger::init_logger(config.log_level.clone());

    let url = req.url()?;
    let path = url.path().to_string();
    let method = req.method();

    log::info!("Request: {} {}", method, path);

    match (method, path.as_str()) {
        (Method::Get, "/health") => handle_health_check(req, env, &config).await,
        (Method::Post, "/viewer-request") => handle_viewer_request(req).await,
        (Method::Post, "/origin-request") => handle_origin_request(req, env).await,
        (Method::Get, "/sign") => handle_sign(req, env).await,
        (method, path) => match &config.origin_url {
            Some(origin) => handle_forward(req, origin).await,
            None => {
                log::warn!("Route not found: {} {}", method, path);
                Response::error("Not Found", 404)
            }
        },
    }
}
