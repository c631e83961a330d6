use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use storefront_admin_api::{
    config::AppConfig,
    dto::auth::NewUser,
    models::Role,
    routes::create_app,
    state::AppState,
    store::{Store, sample_products},
};
use tower::ServiceExt;

const SECRET: &str = "flow-test-secret";

fn app_with_store(store: Store) -> Router {
    let config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: SECRET.into(),
        token_ttl_hours: 1,
        seed_sample_data: false,
    };
    create_app(AppState::new(store, config))
}

fn test_app(seed: bool) -> anyhow::Result<Router> {
    let store = Store::new()?;
    if seed {
        store.initialize_sample_data();
    }
    Ok(app_with_store(store))
}

fn user(email: &str, role: Role, is_active: bool) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: "secret123".to_string(),
        role,
        first_name: "Pat".to_string(),
        last_name: "Doe".to_string(),
        is_active,
    }
}

async fn send(app: &Router, request: Request<Body>) -> anyhow::Result<Response> {
    Ok(app.clone().oneshot(request).await?)
}

async fn json_body(response: Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::COOKIE, format!("admin-token={token}"));
    }
    Ok(builder.body(Body::from(body.to_string()))?)
}

fn get(uri: &str, token: Option<&str>) -> anyhow::Result<Request<Body>> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    Ok(builder.body(Body::empty())?)
}

async fn login_status(app: &Router, email: &str, password: &str) -> anyhow::Result<Response> {
    send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password }),
        )?,
    )
    .await
}

/// Logs in and returns the raw token from the `admin-token` cookie.
async fn login(app: &Router, email: &str, password: &str) -> anyhow::Result<String> {
    let response = login_status(app, email, password).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("set-cookie")
        .to_string();
    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("admin-token="))
        .expect("admin-token cookie")
        .to_string();

    let body = json_body(response).await?;
    assert_eq!(body["data"]["token"], format!("Bearer {token}"));
    Ok(token)
}

fn assert_redirects_to_login(response: &Response) {
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("/admin/login")
    );
}

#[tokio::test]
async fn public_catalog_is_open() -> anyhow::Result<()> {
    let app = test_app(true)?;

    let response = send(&app, get("/api/products?per_page=3", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["meta"]["total"], sample_products().len());

    let response = send(&app, get("/api/products?category=clothing", None)?).await?;
    let body = json_body(response).await?;
    let items = body["data"].as_array().expect("items");
    assert!(!items.is_empty());
    assert!(items.iter().all(|p| p["category"] == "clothing"));

    let response = send(&app, get("/api/products/1", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/api/products/unknown", None)?).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, get("/api/categories", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_requires_login() -> anyhow::Result<()> {
    let app = test_app(true)?;

    let response = send(&app, get("/admin/login", None)?).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/admin", None)?).await?;
    assert_redirects_to_login(&response);

    let response = send(&app, get("/admin/api/orders", Some("bogus"))?).await?;
    assert_redirects_to_login(&response);

    let response = send(
        &app,
        json_request("POST", "/admin/api/products", None, json!({}))?,
    )
    .await?;
    assert_redirects_to_login(&response);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_rejected() -> anyhow::Result<()> {
    let app = test_app(false)?;
    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "admin@storefront.local", "password": "wrong" }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn page_past_the_end_is_empty() -> anyhow::Result<()> {
    let app = test_app(true)?;

    for uri in [
        "/api/products?page=9223372036854775807",
        "/api/products?page=9223372036854775807&per_page=100",
        "/api/products?page=99",
    ] {
        let response = send(&app, get(uri, None)?).await?;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = json_body(response).await?;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0), "{uri}");
        assert_eq!(body["meta"]["total"], sample_products().len());
    }
    Ok(())
}

#[tokio::test]
async fn inactive_admin_cannot_log_in() -> anyhow::Result<()> {
    let store = Store::new()?;
    store.insert_user(user("former@storefront.local", Role::Admin, false))?;
    let app = app_with_store(store);

    let response = login_status(&app, "former@storefront.local", "secret123").await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    Ok(())
}

#[tokio::test]
async fn customer_cannot_log_in_to_admin() -> anyhow::Result<()> {
    let store = Store::new()?;
    store.insert_user(user("shopper@example.com", Role::Customer, true))?;
    let app = app_with_store(store);

    let response = login_status(&app, "shopper@example.com", "secret123").await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    // Wrong password still reads as bad credentials, not as a role problem.
    let response = login_status(&app, "shopper@example.com", "nope").await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn identity_free_token_gets_past_guard_but_not_handlers() -> anyhow::Result<()> {
    let app = test_app(true)?;
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let bare = encode(
        &Header::default(),
        &json!({ "exp": exp }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )?;

    let response = send(&app, get("/admin/api/analytics", Some(&bare))?).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let customer = encode(
        &Header::default(),
        &json!({
            "sub": "9",
            "email": "shopper@example.com",
            "role": "customer",
            "first_name": "Pat",
            "last_name": "Doe",
            "exp": exp
        }),
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )?;
    let response = send(&app, get("/admin/api/analytics", Some(&customer))?).await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_manages_catalog_and_orders() -> anyhow::Result<()> {
    let app = test_app(true)?;
    let token = login(&app, "admin@storefront.local", "admin123").await?;

    let response = send(&app, get("/admin", Some(&token))?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    assert_eq!(body["data"]["totalProducts"], sample_products().len());
    assert_eq!(body["data"]["totalOrders"], 1);

    let response = send(&app, get("/admin/api/me", Some(&token))?).await?;
    let body = json_body(response).await?;
    assert_eq!(body["data"]["email"], "admin@storefront.local");
    assert!(body["data"].get("passwordHash").is_none());

    // Product lifecycle.
    let response = send(
        &app,
        json_request(
            "POST",
            "/admin/api/products",
            Some(&token),
            json!({
                "name": "Desk Lamp",
                "price": 39.5,
                "image": "/images/lamp.jpg",
                "category": "home",
                "description": "Warm LED lamp"
            }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let created = json_body(response).await?["data"].clone();
    let product_id = created["id"].as_str().expect("id").to_string();

    let response = send(
        &app,
        json_request(
            "PATCH",
            &format!("/admin/api/products/{product_id}"),
            Some(&token),
            json!({ "price": 29.5 }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await?["data"].clone();
    assert_eq!(updated["price"], 29.5);
    assert_eq!(updated["name"], "Desk Lamp");

    let response = send(
        &app,
        json_request(
            "DELETE",
            &format!("/admin/api/products/{product_id}"),
            Some(&token),
            json!({}),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        json_request(
            "DELETE",
            &format!("/admin/api/products/{product_id}"),
            Some(&token),
            json!({}),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Order status change keeps the rest of the order.
    let response = send(
        &app,
        json_request(
            "PATCH",
            "/admin/api/orders/ORD-001",
            Some(&token),
            json!({ "status": "cancelled" }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let order = json_body(response).await?["data"].clone();
    assert_eq!(order["status"], "cancelled");
    assert_eq!(order["paymentStatus"], "paid");

    let response = send(
        &app,
        json_request(
            "PATCH",
            "/admin/api/orders/ORD-001",
            Some(&token),
            json!({ "status": "lost" }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, get("/admin/api/orders?status=cancelled", Some(&token))?).await?;
    let body = json_body(response).await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    // Catalog is already populated, so re-seeding does nothing.
    let response = send(
        &app,
        json_request("POST", "/admin/api/sample-data", Some(&token), json!({}))?,
    )
    .await?;
    let body = json_body(response).await?;
    assert_eq!(body["data"]["seeded"], false);
    Ok(())
}

#[tokio::test]
async fn manager_cannot_reseed() -> anyhow::Result<()> {
    let app = test_app(false)?;
    let token = login(&app, "manager@storefront.local", "manager123").await?;

    let response = send(
        &app,
        json_request("POST", "/admin/api/sample-data", Some(&token), json!({}))?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        json_request(
            "POST",
            "/admin/api/customers",
            Some(&token),
            json!({
                "firstName": "Sam",
                "lastName": "Rivera",
                "email": "sam@example.com",
                "joinDate": "2026-01-05T10:00:00Z"
            }),
        )?,
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/admin/api/analytics", Some(&token))?).await?;
    let body = json_body(response).await?;
    assert_eq!(body["data"]["totalCustomers"], 1);
    assert_eq!(body["data"]["conversionRate"], 0.0);
    Ok(())
}
