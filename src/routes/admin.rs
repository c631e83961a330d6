use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::{auth::AuthUser, route_guard::AUTH_COOKIE},
    models::{Analytics, User},
    response::{ApiResponse, Meta},
    routes::{customers, orders, products},
    services::{
        admin_service::{self, SampleDataResult},
        auth_service,
    },
    state::AppState,
};

/// Everything mounted under `/admin`. The route guard sits in front of all of
/// it; `/login` is the one path it never blocks.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/login", get(login_page))
        .route("/api/analytics", get(analytics))
        .route("/api/me", get(me))
        .route("/api/sample-data", post(sample_data))
        .nest("/api/products", products::admin_router())
        .nest("/api/orders", orders::router())
        .nest("/api/customers", customers::router())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub login_endpoint: String,
    pub cookie: String,
}

#[utoipa::path(
    get,
    path = "/admin/login",
    responses(
        (status = 200, description = "How to sign in to the admin console", body = ApiResponse<LoginPage>),
    ),
    tag = "Admin"
)]
pub async fn login_page() -> Json<ApiResponse<LoginPage>> {
    Json(ApiResponse::success(
        "Admin login",
        LoginPage {
            login_endpoint: "/api/auth/login".to_string(),
            cookie: AUTH_COOKIE.to_string(),
        },
        Some(Meta::empty()),
    ))
}

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<Analytics>),
        (status = 307, description = "Redirect to login"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Analytics>>> {
    let resp = admin_service::analytics(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/api/analytics",
    responses(
        (status = 200, description = "Sales and catalog counters", body = ApiResponse<Analytics>),
        (status = 307, description = "Redirect to login"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Analytics>>> {
    let resp = admin_service::analytics(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/admin/api/me",
    responses(
        (status = 200, description = "Signed-in staff user", body = ApiResponse<User>),
        (status = 404, description = "Account no longer exists"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::current_user(&state, &user)?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/api/sample-data",
    responses(
        (status = 200, description = "Load fixtures into an empty catalog", body = ApiResponse<SampleDataResult>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn sample_data(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<SampleDataResult>>> {
    let resp = admin_service::initialize_sample_data(&state, &user)?;
    Ok(Json(resp))
}
