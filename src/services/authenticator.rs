//! Request Authenticator
//!
//! Viewer-request transform: when the request carries a `cf-secret` cookie, the path
//! (uri up to the first `?`) is signed with HMAC-SHA256 keyed by the cookie value and the
//! base64 digest is attached as the `cf-auth` request header. Without the cookie the
//! request passes through untouched.

use crate::types::{ViewerEvent, ViewerRequest};
use crate::utils::{AuthError, AuthResult};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie holding the per-client signing secret
pub const COOKIE_NAME: &str = "cf-secret";
/// Header carrying the path signature to the origin
pub const HEADER_NAME: &str = "cf-auth";

/// The part of `uri` that gets signed: everything before the first `?`.
pub fn signing_input(uri: &str) -> &str {
    uri.split('?').next().unwrap_or(uri)
}

/// Base64 (standard, padded) HMAC-SHA256 of `path` keyed by `secret`.
pub fn sign_path(secret: &str, path: &str) -> AuthResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
    mac.update(path.as_bytes());
    Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Attaches `cf-auth` when the secret cookie is present, otherwise returns `request` as-is.
///
/// An empty cookie value still counts as present. A request without a `headers` map only
/// gains one when the header is attached.
pub fn authenticate(mut request: ViewerRequest) -> AuthResult<ViewerRequest> {
    let Some(secret) = request.cookie(COOKIE_NAME) else {
        return Ok(request);
    };

    let signature = sign_path(secret, signing_input(&request.uri))?;
    request.set_header(HEADER_NAME, signature);

    Ok(request)
}

pub fn authenticate_event(event: ViewerEvent) -> AuthResult<ViewerRequest> {
    authenticate(event.request)
}

/// JSON form of [`authenticate_event`]; a body that is not a viewer event is an error.
pub fn authenticate_json(event: serde_json::Value) -> AuthResult<serde_json::Value> {
    let event: ViewerEvent = serde_json::from_value(event)?;
    let request = authenticate_event(event)?;
    serde_json::to_value(request).map_err(|e| {
        AuthError::serialization_error(format!("Failed to encode viewer request: {}", e))
    })
}
