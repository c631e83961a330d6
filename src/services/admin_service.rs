use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::Analytics,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleDataResult {
    pub seeded: bool,
    pub products: usize,
}

pub fn analytics(state: &AppState, _user: &AuthUser) -> AppResult<ApiResponse<Analytics>> {
    Ok(ApiResponse::success(
        "Analytics",
        state.store.analytics(),
        Some(Meta::empty()),
    ))
}

/// Re-runs the sample-data initializer. Only seeds an empty catalog.
pub fn initialize_sample_data(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<SampleDataResult>> {
    ensure_admin(user)?;
    let seeded = state.store.initialize_sample_data();
    let products = state.store.list_products().len();
    tracing::info!(seeded, products, by = %user.email, "sample data requested");

    let message = if seeded {
        "Sample data loaded"
    } else {
        "Catalog already populated"
    };
    Ok(ApiResponse::success(
        message,
        SampleDataResult { seeded, products },
        Some(Meta::empty()),
    ))
}
