use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::{Debug, Formatter};
use subtle::ConstantTimeEq;
use tracing::warn;

pub const REALM: &str = "tinylink";

const CHALLENGE: &str = "Basic realm=\"tinylink\"";

/// The single user allowed to call the write endpoints.
#[derive(Clone)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks an `Authorization` header value against these credentials.
    ///
    /// Both halves are compared in constant time, and both comparisons run
    /// regardless of whether the first one matched.
    pub fn verify(&self, authorization: &str) -> bool {
        let Some((user, password)) = decode_basic(authorization) else {
            return false;
        };

        let user_ok = user.as_bytes().ct_eq(self.username.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (user_ok & password_ok).into()
    }

    /// Renders a header value for these credentials. Used by clients and tests.
    pub fn to_header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

impl Debug for BasicCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn decode_basic(authorization: &str) -> Option<(String, String)> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(token.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Route layer guarding the write endpoints.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| state.credentials().verify(value));

    if !authorized {
        warn!(
            method = %request.method(),
            uri = %request.uri(),
            "rejected request with missing or invalid credentials"
        );
        return unauthorized();
    }

    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, CHALLENGE)],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> BasicCredentials {
        BasicCredentials::new("admin", "s3cret")
    }

    #[test]
    fn accepts_matching_credentials() {
        let creds = credentials();
        assert!(creds.verify(&creds.to_header_value()));
        // scheme is case-insensitive
        assert!(creds.verify("basic YWRtaW46czNjcmV0"));
    }

    #[test]
    fn rejects_wrong_password_or_user() {
        let creds = credentials();
        assert!(!creds.verify(&BasicCredentials::new("admin", "nope").to_header_value()));
        assert!(!creds.verify(&BasicCredentials::new("root", "s3cret").to_header_value()));
        assert!(!creds.verify(&BasicCredentials::new("admin", "s3cret2").to_header_value()));
    }

    #[test]
    fn rejects_malformed_headers() {
        let creds = credentials();
        assert!(!creds.verify(""));
        assert!(!creds.verify("Basic"));
        assert!(!creds.verify("Bearer YWRtaW46czNjcmV0"));
        assert!(!creds.verify("Basic not-base64!!"));
        // "admin" with no colon
        assert!(!creds.verify("Basic YWRtaW4="));
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = BasicCredentials::new("admin", "a:b:c");
        assert!(creds.verify(&creds.to_header_value()));
    }

    #[test]
    fn debug_hides_password() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn challenge_names_the_realm() {
        assert!(CHALLENGE.contains(REALM));
    }
}
