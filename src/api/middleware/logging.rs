//! Request logging with credential redaction

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use tracing::info;

use crate::domain::CredentialKind;

/// Log each request and its outcome
///
/// Runs inside `TraceLayer`'s span and does not open one of its own.
/// The Authorization header is never logged; only the kind of credential
/// it carries.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = extract_path(&request);
    let request_id = extract_request_id(&request);
    let credential = bearer_kind(&request);
    let headers_log = redact_headers(&request);

    info!(
        method = %method,
        path = %path,
        request_id = %request_id,
        credential = %credential,
        headers = %headers_log,
        "Incoming request"
    );

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = %start.elapsed().as_millis(),
        request_id = %request_id,
        "Request completed"
    );

    response
}

fn extract_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

fn extract_request_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

fn bearer_kind(request: &Request<Body>) -> &'static str {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| CredentialKind::classify(token.trim()).as_str())
        .unwrap_or("none")
}

fn redact_headers(request: &Request<Body>) -> String {
    request
        .headers()
        .iter()
        .filter(|(name, _)| should_log_header(name.as_str()))
        .map(|(name, value)| {
            let value = if is_sensitive_header(name.as_str()) {
                "[REDACTED]"
            } else {
                value.to_str().unwrap_or("[invalid]")
            };
            format!("{}={}", name, value)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_sensitive_header(name: &str) -> bool {
    matches!(
        name,
        "authorization" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

fn should_log_header(name: &str) -> bool {
    matches!(
        name,
        "content-type"
            | "content-length"
            | "accept"
            | "user-agent"
            | "x-request-id"
            | "x-forwarded-for"
            | "authorization"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/tools/query_gdelt_gkg");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_authorization_is_redacted() {
        let request = request_with(&[
            ("authorization", "Bearer gdelt_sk_secret"),
            ("user-agent", "curl/8"),
        ]);

        let logged = redact_headers(&request);
        assert!(logged.contains("authorization=[REDACTED]"));
        assert!(logged.contains("user-agent=curl/8"));
        assert!(!logged.contains("gdelt_sk_secret"));
    }

    #[test]
    fn test_unlisted_headers_are_skipped() {
        let request = request_with(&[("etag", "abc")]);
        assert!(redact_headers(&request).is_empty());
    }

    #[test]
    fn test_bearer_kind() {
        assert_eq!(bearer_kind(&request_with(&[])), "none");
        assert_eq!(
            bearer_kind(&request_with(&[("authorization", "Bearer gdelt_sk_x")])),
            "api_key"
        );
        assert_eq!(
            bearer_kind(&request_with(&[("authorization", "Bearer eyJ.x.y")])),
            "identity_token"
        );
        assert_eq!(
            bearer_kind(&request_with(&[("authorization", "Basic abc")])),
            "none"
        );
    }

    #[test]
    fn test_request_id_is_kept_or_generated() {
        let request = request_with(&[("x-request-id", "req-1")]);
        assert_eq!(extract_request_id(&request), "req-1");

        let generated = extract_request_id(&request_with(&[]));
        assert!(uuid::Uuid::parse_str(&generated).is_ok());
    }
}
