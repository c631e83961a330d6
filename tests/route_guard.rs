use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use storefront_admin_api::{
    dto::auth::AdminClaims,
    middleware::route_guard::{GuardDecision, GuardRejection, RouteGuard, extract_token},
    models::Role,
    services::auth_service::issue_token,
};

const SECRET: &str = "guard-test-secret";

fn claims(exp: Option<i64>) -> AdminClaims {
    AdminClaims {
        sub: "1".into(),
        email: "admin@storefront.local".into(),
        role: Role::Admin,
        first_name: "Store".into(),
        last_name: "Admin".into(),
        exp: exp.map(|e| e as u64),
    }
}

fn token(exp: Option<i64>) -> String {
    issue_token(&claims(exp), SECRET).expect("token")
}

fn cookie(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("theme=dark; admin-token={value}")).expect("header"),
    );
    headers
}

fn bearer(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {value}")).expect("header"),
    );
    headers
}

fn future() -> Option<i64> {
    Some((Utc::now() + Duration::hours(1)).timestamp())
}

fn past() -> Option<i64> {
    Some((Utc::now() - Duration::hours(1)).timestamp())
}

#[test]
fn login_page_always_passes() {
    let guard = RouteGuard::new(SECRET);
    for headers in [HeaderMap::new(), cookie("garbage"), cookie(&token(past()))] {
        assert!(matches!(guard.decide("/admin/login", &headers), GuardDecision::Pass));
        assert!(matches!(guard.decide("/admin/login/", &headers), GuardDecision::Pass));
    }
}

#[test]
fn non_admin_paths_pass() {
    let guard = RouteGuard::new(SECRET);
    let empty = HeaderMap::new();
    assert!(matches!(guard.decide("/api/products", &empty), GuardDecision::Pass));
    assert!(matches!(guard.decide("/health", &empty), GuardDecision::Pass));
    assert!(matches!(guard.decide("/administrator", &empty), GuardDecision::Pass));
}

#[test]
fn missing_token_redirects() {
    let guard = RouteGuard::new(SECRET);
    let decision = guard.decide("/admin/api/orders", &HeaderMap::new());
    assert!(matches!(
        decision,
        GuardDecision::Redirect(GuardRejection::MissingToken)
    ));
    let decision = guard.decide("/admin", &HeaderMap::new());
    assert!(matches!(
        decision,
        GuardDecision::Redirect(GuardRejection::MissingToken)
    ));
}

#[test]
fn malformed_token_redirects() {
    let guard = RouteGuard::new(SECRET);
    for headers in [cookie("not-a-token"), bearer("eyJub3QiOiJqc29uIn0")] {
        assert!(matches!(
            guard.decide("/admin/api/orders", &headers),
            GuardDecision::Redirect(GuardRejection::InvalidToken)
        ));
    }
}

#[test]
fn token_signed_with_other_secret_redirects() {
    let guard = RouteGuard::new(SECRET);
    let forged = issue_token(&claims(future()), "someone-else").expect("token");
    assert!(matches!(
        guard.decide("/admin", &cookie(&forged)),
        GuardDecision::Redirect(GuardRejection::InvalidToken)
    ));
}

#[test]
fn expired_token_redirects() {
    let guard = RouteGuard::new(SECRET);
    assert!(matches!(
        guard.decide("/admin/api/analytics", &cookie(&token(past()))),
        GuardDecision::Redirect(GuardRejection::Expired)
    ));
}

#[test]
fn valid_token_passes_with_claims() {
    let guard = RouteGuard::new(SECRET);
    for headers in [cookie(&token(future())), bearer(&token(future()))] {
        match guard.decide("/admin/api/orders", &headers) {
            GuardDecision::Authorized(token) => {
                let claims = AdminClaims::from_token(token).expect("staff claims");
                assert_eq!(claims.sub, "1");
                assert_eq!(claims.role, Role::Admin);
            }
            other => panic!("expected authorized, got {other:?}"),
        }
    }
}

#[test]
fn token_without_expiry_passes() {
    let guard = RouteGuard::new(SECRET);
    assert!(matches!(
        guard.decide("/admin", &cookie(&token(None))),
        GuardDecision::Authorized(_)
    ));
}

#[test]
fn cookie_wins_over_header() {
    let mut headers = cookie("from-cookie");
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_static("Bearer from-header"),
    );
    assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));

    assert_eq!(
        extract_token(&bearer("from-header")).as_deref(),
        Some("from-header")
    );

    let mut basic = HeaderMap::new();
    basic.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
    assert_eq!(extract_token(&basic), None);
}

#[test]
fn signed_token_with_only_expiry_passes() {
    let guard = RouteGuard::new(SECRET);
    let exp = future().map(|e| e as u64);
    let bare = encode(
        &Header::default(),
        &json!({ "exp": exp }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token");

    match guard.decide("/admin/api/orders", &cookie(&bare)) {
        GuardDecision::Authorized(token) => {
            assert_eq!(token.exp, exp);
            assert!(token.extra.is_empty());
            // The identity is checked by the handler, not the guard.
            assert!(AdminClaims::from_token(token).is_err());
        }
        other => panic!("expected authorized, got {other:?}"),
    }
}

#[test]
fn unknown_claims_do_not_block_the_guard() {
    let guard = RouteGuard::new(SECRET);
    let odd = encode(
        &Header::default(),
        &json!({ "role": "wizard", "scope": ["x"] }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("token");

    assert!(matches!(
        guard.decide("/admin", &bearer(&odd)),
        GuardDecision::Authorized(_)
    ));
}
