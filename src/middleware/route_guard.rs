//! Gate for everything under `/admin`.
//!
//! The login page is always reachable. Any other admin path needs a signed
//! admin token, taken from the `admin-token` cookie or, failing that, a
//! `Bearer` authorization header. A missing, unverifiable or expired token
//! sends the browser to the login page; the reason only shows up in logs.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::{dto::auth::TokenClaims, state::AppState};

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
pub const AUTH_COOKIE: &str = "admin-token";

#[derive(Debug)]
pub enum GuardDecision {
    /// Path is public or is the login page.
    Pass,
    /// Signature and expiry check out; claims are handed to the handler.
    Authorized(TokenClaims),
    Redirect(GuardRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    MissingToken,
    InvalidToken,
    Expired,
}

#[derive(Clone)]
pub struct RouteGuard {
    key: DecodingKey,
    validation: Validation,
}

impl RouteGuard {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is honoured when present but not required.
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn decide(&self, path: &str, headers: &HeaderMap) -> GuardDecision {
        if !is_admin_path(path) || is_login_path(path) {
            return GuardDecision::Pass;
        }

        let Some(token) = extract_token(headers) else {
            return GuardDecision::Redirect(GuardRejection::MissingToken);
        };

        match decode::<TokenClaims>(&token, &self.key, &self.validation) {
            Ok(data) => GuardDecision::Authorized(data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    GuardDecision::Redirect(GuardRejection::Expired)
                }
                _ => GuardDecision::Redirect(GuardRejection::InvalidToken),
            },
        }
    }
}

pub async fn route_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    match state.guard.decide(&path, request.headers()) {
        GuardDecision::Pass => next.run(request).await,
        GuardDecision::Authorized(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GuardDecision::Redirect(reason) => {
            tracing::debug!(path = %path, reason = ?reason, "admin request redirected to login");
            Redirect::temporary(LOGIN_PATH).into_response()
        }
    }
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX || path.starts_with("/admin/")
}

fn is_login_path(path: &str) -> bool {
    path.trim_end_matches('/') == LOGIN_PATH
}

/// Cookie first, then `Authorization: Bearer <token>`.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == AUTH_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());
    if from_cookie.is_some() {
        return from_cookie;
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
