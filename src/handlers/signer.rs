use super::error_response;
use crate::middleware::cookies_from_request;
use crate::services::authenticator::COOKIE_NAME;
use crate::services::signer::{RandomTokenSource, Signer};
use crate::services::sigv4::AwsCredentials;
use crate::types::OriginEvent;
use crate::utils::{AuthError, AuthResult, SignerConfig};
use worker::{Env, Headers, Request, Response, Result};

fn load(env: &Env) -> AuthResult<(SignerConfig, AwsCredentials)> {
    Ok((SignerConfig::from_env(env)?, AwsCredentials::from_env(env)?))
}

/// GET /sign: issue the cookie and redirect straight from the live request
pub async fn handle_sign(req: Request, env: Env) -> Result<Response> {
    let (config, credentials) = match load(&env) {
        Ok(loaded) => loaded,
        Err(err) => return error_response(&err),
    };

    let cookies = cookies_from_request(&req)?;
    let signer = Signer::new(&config, &credentials, RandomTokenSource);
    let redirect = match signer.sign(
        cookies.get(COOKIE_NAME).map(String::as_str),
        chrono::Utc::now(),
    ) {
        Ok(redirect) => redirect,
        Err(err) => return error_response(&err),
    };
    log::info!(
        "Issued signed redirect (new token: {})",
        redirect.set_cookie.is_some()
    );

    let mut headers = Headers::new();
    for (name, value) in redirect.headers() {
        headers.set(name, value)?;
    }
    Ok(Response::from_html(redirect.body.clone())?
        .with_status(302)
        .with_headers(headers))
}

/// POST /origin-request: Lambda@Edge origin event in, generated response JSON out
pub async fn handle_origin_request(mut req: Request, env: Env) -> Result<Response> {
    let event: OriginEvent = match req.json().await {
        Ok(event) => event,
        Err(e) => {
            return error_response(&AuthError::parse_error(format!(
                "Invalid origin event body: {}",
                e
            )))
        }
    };

    let (config, credentials) = match load(&env) {
        Ok(loaded) => loaded,
        Err(err) => return error_response(&err),
    };

    let signer = Signer::new(&config, &credentials, RandomTokenSource);
    match signer.handle_origin_event(&event, chrono::Utc::now()) {
        Ok(response) => Response::from_json(&response),
        Err(err) => error_response(&err),
    }
}
