use serde_json::{Map, Value};

use crate::{
    dto::products::{CategoryList, NewProduct, ProductList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Category, Product, Role},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub fn list_products(state: &AppState, query: ProductQuery) -> AppResult<ApiResponse<ProductList>> {
    let mut items: Vec<Product> = state
        .store
        .list_products()
        .into_iter()
        .filter(|p| matches_product(p, &query))
        .collect();

    let sort_by = query.sort_by.unwrap_or(ProductSortBy::CreatedAt);
    match sort_by {
        ProductSortBy::CreatedAt => items.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ProductSortBy::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        ProductSortBy::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    if let Some(SortOrder::Desc) = query.sort_order {
        items.reverse();
    }

    let (items, meta) = query.pagination().apply(items);
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

fn matches_product(product: &Product, query: &ProductQuery) -> bool {
    if let Some(category) = query.category.as_ref().filter(|c| !c.is_empty()) {
        if &product.category != category {
            return false;
        }
    }
    if let Some(search) = query.q.as_ref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        if !product.name.to_lowercase().contains(&needle)
            && !product.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if query.min_price.is_some_and(|min| product.price < min) {
        return false;
    }
    if query.max_price.is_some_and(|max| product.price > max) {
        return false;
    }
    true
}

pub fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state.store.get_product(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: NewProduct,
) -> AppResult<ApiResponse<Product>> {
    let product = state.store.create_product(payload);
    tracing::info!(product_id = %product.id, by = %user.email, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Product>> {
    let product = state
        .store
        .update_product(id, patch)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(product_id = %product.id, by = %user.email, "product updated");

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Value>> {
    ensure_role(user, &[Role::Admin, Role::Manager])?;
    if !state.store.delete_product(id) {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = %id, by = %user.email, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let items = state.store.list_categories();
    let meta = Meta::single_page(items.len());
    Ok(ApiResponse::success("Categories", CategoryList { items }, Some(meta)))
}

pub fn get_category(state: &AppState, id: &str) -> AppResult<ApiResponse<Category>> {
    let category = state.store.get_category(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Category", category, None))
}
