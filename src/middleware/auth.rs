use crate::services::authenticator::HEADER_NAME;
use crate::services::cookies::parse_cookie_header;
use crate::types::ViewerRequest;
use std::collections::BTreeMap;
use url::Url;
use worker::{Headers, Request, Result};

/// Parse the `Cookie` header of an incoming request
pub fn cookies_from_request(req: &Request) -> Result<BTreeMap<String, String>> {
    Ok(req
        .headers()
        .get("Cookie")?
        .map(|header| parse_cookie_header(&header))
        .unwrap_or_default())
}

/// Path plus `?query` as the CDN reports it in `uri`
pub fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Build the viewer-request record from a request's uri, method and header pairs.
///
/// Header names are lower-cased and cookies come from the `cookie` header.
pub fn viewer_request_from_parts<I>(uri: String, method: &str, headers: I) -> ViewerRequest
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut viewer = ViewerRequest::new(uri);
    for (name, value) in headers {
        let name = name.to_ascii_lowercase();
        if name == "cookie" {
            for (cookie, cookie_value) in parse_cookie_header(&value) {
                viewer = viewer.with_cookie(cookie, cookie_value);
            }
        }
        viewer.set_header(name, value);
    }
    viewer.extra.insert(
        "method".to_string(),
        serde_json::Value::String(method.to_string()),
    );
    viewer
}

/// Build the viewer-request record for a live worker request
pub fn viewer_request_from_worker(req: &Request) -> Result<ViewerRequest> {
    let uri = request_uri(&req.url()?);
    Ok(viewer_request_from_parts(
        uri,
        &req.method().to_string(),
        req.headers().entries(),
    ))
}

/// Copy the computed `cf-auth` header (if any) onto outgoing headers
pub fn apply_auth_header(headers: &mut Headers, viewer: &ViewerRequest) -> Result<()> {
    if let Some(signature) = viewer.header(HEADER_NAME) {
        headers.set(HEADER_NAME, signature)?;
    }
    Ok(())
}
