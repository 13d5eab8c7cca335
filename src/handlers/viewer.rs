use super::error_response;
use crate::middleware::{apply_auth_header, viewer_request_from_worker};
use crate::services::authenticator::{authenticate, authenticate_json};
use crate::utils::AuthError;
use url::Url;
use worker::{Fetch, Headers, Method, Request, RequestInit, Response, Result};

/// POST /viewer-request: viewer event JSON in, transformed request JSON out
pub async fn handle_viewer_request(mut req: Request) -> Result<Response> {
    let event: serde_json::Value = match req.json().await {
        Ok(event) => event,
        Err(e) => {
            return error_response(&AuthError::parse_error(format!(
                "Invalid viewer event body: {}",
                e
            )))
        }
    };

    match authenticate_json(event) {
        Ok(request) => Response::from_json(&request),
        Err(err) => error_response(&err),
    }
}

/// Authenticate the live request and pass it on to `origin`
pub async fn handle_forward(mut req: Request, origin: &Url) -> Result<Response> {
    let viewer = match authenticate(viewer_request_from_worker(&req)?) {
        Ok(viewer) => viewer,
        Err(err) => return error_response(&err),
    };

    let url = req.url()?;
    let target = forward_target(origin, &url);

    let mut headers = Headers::new();
    for (name, value) in req.headers().entries() {
        if forwards_header(&name) {
            headers.append(&name, &value)?;
        }
    }
    apply_auth_header(&mut headers, &viewer)?;

    let method = req.method();
    let mut init = RequestInit::new();
    init.with_method(method.clone()).with_headers(headers);
    if !matches!(method, Method::Get | Method::Head) {
        let body = req.bytes().await?;
        if !body.is_empty() {
            init.with_body(Some(
                worker::js_sys::Uint8Array::from(body.as_slice()).into(),
            ));
        }
    }

    log::debug!("Forwarding {} {} to {}", method, url.path(), target);

    let forwarded = Request::new_with_init(target.as_str(), &init)?;
    match Fetch::Request(forwarded).send().await {
        Ok(response) => Ok(response),
        Err(e) => error_response(&AuthError::upstream_error(format!(
            "Origin request failed: {}",
            e
        ))),
    }
}

/// `origin` with the path and query of the incoming `url`
pub fn forward_target(origin: &Url, url: &Url) -> Url {
    let mut target = origin.clone();
    target.set_path(url.path());
    target.set_query(url.query());
    target
}

/// `host` is set by the fetch to the origin.
fn forwards_header(name: &str) -> bool {
    !name.eq_ignore_ascii_case("host")
}
