use crate::types::EdgeHeaders;
use std::collections::BTreeMap;

/// Parses a `Cookie` header value into name -> value.
///
/// A repeated name keeps its last value. Surrounding double quotes are removed from values.
pub fn parse_cookie_header(header: &str) -> BTreeMap<String, String> {
    let mut cookies = BTreeMap::new();

    for part in header.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((name, value)) = part.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);

        cookies.insert(name.to_string(), value.to_string());
    }

    cookies
}

/// Cookies from the first `cookie` entry of Lambda@Edge headers.
pub fn cookies_from_edge_headers(headers: &EdgeHeaders) -> BTreeMap<String, String> {
    headers
        .get("cookie")
        .and_then(|entries| entries.first())
        .map(|entry| parse_cookie_header(&entry.value))
        .unwrap_or_default()
}

/// `Set-Cookie` value for a browser-held secret.
pub fn session_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}; Secure; HttpOnly; SameSite=Lax")
}
