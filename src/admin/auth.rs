//! HTTP basic authentication for the admin portal.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use subtle::ConstantTimeEq;

/// The only accepted admin username.
pub const ADMIN_USERNAME: &str = "admin";

/// Shared state for the admin portal: the configured password.
#[derive(Clone)]
pub struct AdminState {
    password: Arc<str>,
}

impl AdminState {
    pub fn new(password: impl Into<Arc<str>>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Check a username/password pair against the admin credential.
    pub fn verify(&self, credentials: &Credentials) -> bool {
        let user_ok = credentials.username == ADMIN_USERNAME;
        let pass_ok: bool = credentials
            .password
            .as_bytes()
            .ct_eq(self.password.as_bytes())
            .into();
        user_ok && pass_ok
    }
}

/// Credentials decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Decode basic-auth credentials. Returns `None` when the header is absent
/// or malformed.
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"admin\"")],
        "401 - unauthorized",
    )
        .into_response()
}

pub async fn admin_auth_middleware(
    State(state): State<AdminState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match parse_basic_auth(request.headers()) {
        Some(credentials) if state.verify(&credentials) => next.run(request).await,
        Some(credentials) => {
            tracing::warn!(username = %credentials.username, "Admin login rejected");
            unauthorized()
        }
        None => unauthorized(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn basic(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(raw));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn test_parse_valid_header() {
        let creds = parse_basic_auth(&basic("admin:pa:ss")).unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_basic_auth(&HeaderMap::new()), None);
        assert_eq!(parse_basic_auth(&basic("no-colon")), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(parse_basic_auth(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic !!!"));
        assert_eq!(parse_basic_auth(&headers), None);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let value = format!("basic {}", STANDARD.encode("admin:x"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        assert!(parse_basic_auth(&headers).is_some());
    }

    #[test]
    fn test_verify() {
        let state = AdminState::new("secret");
        let creds = |u: &str, p: &str| Credentials {
            username: u.into(),
            password: p.into(),
        };

        assert!(state.verify(&creds("admin", "secret")));
        assert!(!state.verify(&creds("admin", "secret2")));
        assert!(!state.verify(&creds("admin", "")));
        assert!(!state.verify(&creds("root", "secret")));
    }
}
