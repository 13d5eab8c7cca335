// Signed-URL issuer: cookie handling, presigned location, Lambda@Edge response shape

mod common;

use cf_auth_edge::services::authenticator::{authenticate, sign_path};
use cf_auth_edge::services::signer::{RandomTokenSource, Signer, TokenSource};
use cf_auth_edge::types::{OriginEvent, ViewerRequest};
use cf_auth_edge::{COOKIE_NAME, HEADER_NAME};
use common::*;
use serde_json::json;

struct FixedToken(&'static str);

impl TokenSource for FixedToken {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

fn origin_event(cookie_header: Option<&str>) -> OriginEvent {
    let headers = match cookie_header {
        Some(value) => json!({ "cookie": [{ "key": "Cookie", "value": value }] }),
        None => json!({}),
    };
    serde_json::from_value(json!({
        "Records": [{
            "cf": { "request": { "method": "GET", "uri": "/sign", "headers": headers } }
        }]
    }))
    .unwrap()
}

#[test]
fn existing_cookie_yields_known_presigned_url() {
    let config = report_config();
    let credentials = example_credentials();
    let signer = Signer::new(&config, &credentials, FixedToken("never-used"));

    let response = signer
        .handle_origin_event(
            &origin_event(Some("theme=dark; cf-secret=topsecret")),
            fixture_time(),
        )
        .unwrap();

    assert_eq!(response.status, "302");
    assert_eq!(response.status_description, "Found");
    assert_eq!(response.header("location"), Some(REPORT_URL));
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert!(response.header("set-cookie").is_none());
    assert!(response.body.contains("Click me!"));
    assert!(response.body.contains("&amp;X-Amz-Signature="));
}

#[test]
fn session_token_is_carried_into_url() {
    let config = report_config();
    let credentials = example_credentials().with_session_token(SESSION_TOKEN);
    let signer = Signer::new(&config, &credentials, FixedToken("never-used"));

    let redirect = signer.sign(Some(SECRET), fixture_time()).unwrap();
    assert_eq!(redirect.location, REPORT_URL_WITH_TOKEN);
}

#[test]
fn missing_cookie_issues_one_and_signs_with_it() {
    let config = report_config();
    let credentials = example_credentials();
    let signer = Signer::new(&config, &credentials, FixedToken(SECRET));

    let response = signer
        .handle_origin_event(&origin_event(None), fixture_time())
        .unwrap();

    assert_eq!(
        response.header("set-cookie"),
        Some("cf-secret=topsecret; Secure; HttpOnly; SameSite=Lax")
    );
    // Same secret, same URL as when the cookie already existed
    assert_eq!(response.header("location"), Some(REPORT_URL));
}

#[test]
fn issued_url_matches_what_the_viewer_hook_computes() {
    let config = report_config();
    let expected = sign_path(SECRET, "/private/report.pdf").unwrap();
    assert_eq!(expected, "NX+JbJvn91xLaX2rYoDlqEkmn6RenRo9cbd4Gp8jS78=");

    // The browser follows the redirect to the CDN with its cookie
    let path_and_query = REPORT_URL
        .strip_prefix(&format!("https://{}", config.cf_domain))
        .unwrap();
    let viewer = ViewerRequest::new(path_and_query).with_cookie(COOKIE_NAME, SECRET);
    let forwarded = authenticate(viewer).unwrap();

    assert_eq!(forwarded.header(HEADER_NAME), Some(expected.as_str()));
}

#[test]
fn edge_response_serializes_in_lambda_shape() {
    let config = report_config();
    let credentials = example_credentials();
    let signer = Signer::new(&config, &credentials, FixedToken(SECRET));

    let response = signer
        .handle_origin_event(&origin_event(None), fixture_time())
        .unwrap();
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["status"], "302");
    assert_eq!(value["statusDescription"], "Found");
    assert_eq!(value["headers"]["location"][0]["key"], "location");
    assert_eq!(value["headers"]["location"][0]["value"], REPORT_URL);
    assert_eq!(value["headers"]["set-cookie"][0]["key"], "set-cookie");
}

#[test]
fn random_tokens_are_fresh() {
    let first = RandomTokenSource.generate();
    let second = RandomTokenSource.generate();
    assert_eq!(first.len(), 24);
    assert_ne!(first, second);
}
