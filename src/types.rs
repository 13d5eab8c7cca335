// src/types.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields of a record that this crate does not interpret but must hand back untouched.
pub type Passthrough = BTreeMap<String, Value>;

pub type CookieMap = BTreeMap<String, CookieValue>;
pub type HeaderMap = BTreeMap<String, HeaderValue>;

/// A single cookie as delivered in a viewer-request event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookieValue {
    pub value: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl CookieValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            extra: Passthrough::new(),
        }
    }
}

/// A single header as delivered in a viewer-request event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderValue {
    pub value: String,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl HeaderValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            extra: Passthrough::new(),
        }
    }
}

/// The request record handed to a viewer-request hook.
///
/// `uri` may carry a `?query` suffix. Fields other than `uri`, `cookies` and `headers`
/// (`method`, `querystring`, ...) are kept in `extra` and serialized back as-is. A missing
/// `cookies` or `headers` map stays missing on the way out.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewerRequest {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<CookieMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeaderMap>,
    #[serde(flatten)]
    pub extra: Passthrough,
}

impl ViewerRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies
            .get_or_insert_with(CookieMap::new)
            .insert(name.into(), CookieValue::new(value));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Inserts or replaces a header, creating the header map if the request had none.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name.into(), HeaderValue::new(value));
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .as_ref()
            .and_then(|cookies| cookies.get(name))
            .map(|c| c.value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(name))
            .map(|h| h.value.as_str())
    }
}

/// Viewer-request event envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerEvent {
    pub request: ViewerRequest,
    #[serde(flatten)]
    pub extra: Passthrough,
}

// ============================================================================
// Lambda@Edge origin-request shapes (used by the signed-URL issuer)
// ============================================================================

/// One entry in a Lambda@Edge header list: `{"key": "Cookie", "value": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeHeaderEntry {
    pub key: String,
    pub value: String,
}

/// Lambda@Edge headers: lower-cased name -> list of entries
pub type EdgeHeaders = BTreeMap<String, Vec<EdgeHeaderEntry>>;

/// Converts a flat name/value map into the Lambda@Edge list form.
pub fn to_edge_headers<I, K, V>(headers: I) -> EdgeHeaders
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    headers
        .into_iter()
        .map(|(key, value)| {
            let key = key.as_ref().to_string();
            let entry = EdgeHeaderEntry {
                key: key.clone(),
                value: value.as_ref().to_string(),
            };
            (key, vec![entry])
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeRequest {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: EdgeHeaders,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCloudFront {
    pub request: EdgeRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub cf: EdgeCloudFront,
}

/// Lambda@Edge event envelope: `{"Records": [{"cf": {"request": {...}}}]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginEvent {
    #[serde(rename = "Records")]
    pub records: Vec<EdgeRecord>,
}

/// A generated response returned from an origin-request hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    pub status: String,
    pub status_description: String,
    pub headers: EdgeHeaders,
    pub body: String,
}

impl EdgeResponse {
    /// First value of a header, looked up by its lower-cased name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|entries| entries.first())
            .map(|entry| entry.value.as_str())
    }
}
