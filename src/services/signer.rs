//! Signed-URL issuer
//!
//! Hands the browser a `cf-secret` cookie (reusing one it already has) and redirects it to
//! a presigned S3 URL whose signature covers the matching `cf-auth` header. The URL is
//! rewritten to the CDN domain, where the viewer-request authenticator recomputes `cf-auth`
//! from the cookie. A leaked URL is useless without the cookie.

use crate::services::authenticator::{sign_path, COOKIE_NAME, HEADER_NAME};
use crate::services::cookies::{cookies_from_edge_headers, session_cookie};
use crate::services::sigv4::{AwsCredentials, S3Presigner};
use crate::types::{to_edge_headers, EdgeRequest, EdgeResponse, OriginEvent};
use crate::utils::{AuthError, AuthResult, SignerConfig};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use rand::RngCore;
use std::collections::BTreeMap;
use url::Url;

/// Source of fresh `cf-secret` values
pub trait TokenSource {
    fn generate(&self) -> String;
}

/// 16 random bytes, base64 encoded
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn generate(&self) -> String {
        generate_token()
    }
}

pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    general_purpose::STANDARD.encode(bytes)
}

/// Outcome of signing, before it is shaped into a platform response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRedirect {
    pub location: String,
    /// `Set-Cookie` value, present only when a new token was issued
    pub set_cookie: Option<String>,
    pub body: String,
}

impl SignedRedirect {
    /// Response headers keyed by lower-cased name.
    pub fn headers(&self) -> BTreeMap<&'static str, &str> {
        let mut headers = BTreeMap::new();
        headers.insert("content-type", "text/html");
        headers.insert("location", self.location.as_str());
        if let Some(cookie) = &self.set_cookie {
            headers.insert("set-cookie", cookie.as_str());
        }
        headers
    }

    pub fn into_edge_response(self) -> EdgeResponse {
        let headers = to_edge_headers(self.headers());
        EdgeResponse {
            status: "302".to_string(),
            status_description: "Found".to_string(),
            headers,
            body: self.body,
        }
    }
}

pub struct Signer<'a, T: TokenSource> {
    config: &'a SignerConfig,
    credentials: &'a AwsCredentials,
    tokens: T,
}

impl<'a, T: TokenSource> Signer<'a, T> {
    pub fn new(config: &'a SignerConfig, credentials: &'a AwsCredentials, tokens: T) -> Self {
        Self {
            config,
            credentials,
            tokens,
        }
    }

    /// Builds the redirect for a client whose existing secret (if any) is `existing_token`.
    pub fn sign(
        &self,
        existing_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<SignedRedirect> {
        let (token, set_cookie) = match existing_token {
            Some(token) => (token.to_string(), None),
            None => {
                let token = self.tokens.generate();
                let cookie = session_cookie(COOKIE_NAME, &token);
                (token, Some(cookie))
            }
        };

        let cf_auth = sign_path(&token, &format!("/{}", self.config.s3_object))?;
        let presigned = S3Presigner::new(self.credentials, &self.config.s3_bucket_region)
            .presign(
                &self.config.object_url(),
                &[(HEADER_NAME, cf_auth.as_str())],
                now,
            )?;
        let location = replace_domain(presigned, &self.config.cf_domain)?;

        log::debug!(
            "Issued signed URL for {} (new token: {})",
            self.config.s3_object,
            set_cookie.is_some()
        );

        Ok(SignedRedirect {
            body: redirect_page(&location),
            location,
            set_cookie,
        })
    }

    /// Signs for a Lambda@Edge request, reading the secret from its `cookie` header.
    pub fn sign_edge_request(
        &self,
        request: &EdgeRequest,
        now: DateTime<Utc>,
    ) -> AuthResult<EdgeResponse> {
        let cookies = cookies_from_edge_headers(&request.headers);
        let redirect = self.sign(cookies.get(COOKIE_NAME).map(String::as_str), now)?;
        Ok(redirect.into_edge_response())
    }

    /// Signs for the first record of a Lambda@Edge origin-request event.
    pub fn handle_origin_event(
        &self,
        event: &OriginEvent,
        now: DateTime<Utc>,
    ) -> AuthResult<EdgeResponse> {
        let record = event
            .records
            .first()
            .ok_or_else(|| AuthError::validation_error("Event contains no records"))?;
        self.sign_edge_request(&record.cf.request, now)
    }
}

/// Swaps the host of a presigned URL, keeping path and query untouched.
pub fn replace_domain(mut url: Url, domain: &str) -> AuthResult<String> {
    url.set_host(Some(domain))
        .map_err(|e| AuthError::config_error(format!("Invalid domain {}: {}", domain, e)))?;
    Ok(url.to_string())
}

fn redirect_page(url: &str) -> String {
    let href = url.replace('&', "&amp;").replace('"', "&quot;");
    format!(
        "<!DOCTYPE html>\n<html>\n<body>\n    <a href=\"{}\">Click me!</a>\n</body>\n</html>\n",
        href
    )
}
