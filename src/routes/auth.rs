//! Auth routes — mock cookie login and the `/api` guard.
//!
//! DESIGN
//! ======
//! There are no user accounts. Signup validates the form and stores
//! nothing. Login accepts any well-formed email with a password of at least
//! eight characters and sets an opaque `auth_token` cookie. The guard only
//! checks that the cookie is present and non-empty; it is disabled entirely
//! when `AUTH_REQUIRED` is off.

use std::fmt::Write;

use axum::extract::{FromRef, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rand::Rng;
use serde::Deserialize;
use time::Duration;
use tracing::{info, warn};

use crate::routes::error::ApiError;
use crate::services::catalog::ValidationError;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "auth_token";
const MIN_PASSWORD_LEN: usize = 8;

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Loose shape check: one `@`, a non-empty local part, and a dotted domain.
pub(crate) fn is_valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !raw.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// Optional leading `+`, then 10 to 15 digits.
pub(crate) fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Proof that the request carried a non-empty auth cookie, or that auth is
/// disabled.
pub struct AuthToken;

impl<S> axum::extract::FromRequestParts<S> for AuthToken
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if !app_state.config.auth_required {
            return Ok(Self);
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::unauthorized());
        }
        Ok(Self)
    }
}

/// Route layer for `/api/*`: rejects with 401 before the handler runs.
pub async fn require_auth(_auth: AuthToken, request: Request, next: Next) -> Response {
    next.run(request).await
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
}

/// First failing field, in form order.
pub(crate) fn validate_signup(body: &SignupBody) -> Result<(), ValidationError> {
    if body.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Name is required"));
    }
    if !is_valid_email(&body.email) {
        return Err(ValidationError::new("email", "Please enter a valid email address"));
    }
    if body.phone.trim().len() < 10 {
        return Err(ValidationError::new("phone", "Phone number must be at least 10 digits"));
    }
    if !is_valid_phone(body.phone.trim()) {
        return Err(ValidationError::new("phone", "Invalid phone number format"));
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("password", "Password must be at least 8 characters"));
    }
    if body.confirm_password != body.password {
        return Err(ValidationError::new("confirm_password", "Passwords do not match"));
    }
    Ok(())
}

fn session_cookie(value: String, max_age: Option<Duration>) -> Cookie<'static> {
    let mut cookie = Cookie::build((COOKIE_NAME, value)).path("/").http_only(true).same_site(SameSite::Lax);
    if let Some(age) = max_age {
        cookie = cookie.max_age(age);
    }
    cookie.build()
}

/// `POST /auth/signup` — validate the signup form. No account is stored and
/// no cookie is set; the client logs in afterwards.
pub async fn signup(Json(body): Json<SignupBody>) -> Response {
    if let Err(err) = validate_signup(&body) {
        warn!(field = err.field, "signup rejected");
        return ApiError::invalid_field(err).into_response();
    }
    info!(email = %body.email.trim(), "signup");
    (StatusCode::CREATED, Json(serde_json::json!({ "ok": true }))).into_response()
}

/// `POST /auth/login` — validate credentials shape and set the auth cookie.
pub async fn login(jar: CookieJar, Json(body): Json<LoginBody>) -> Response {
    if !is_valid_email(&body.email) {
        return ApiError::bad_request("Please enter a valid email address").into_response();
    }
    if body.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("login rejected: short password");
        return ApiError::bad_request("Password must be at least 8 characters").into_response();
    }

    info!(email = %body.email.trim(), "login");
    let jar = jar.add(session_cookie(generate_token(), None));
    (jar, Json(serde_json::json!({ "ok": true }))).into_response()
}

/// `POST /auth/logout` — clear the auth cookie.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(session_cookie(String::new(), Some(Duration::ZERO)));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
