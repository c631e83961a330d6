use serde_json::{Map, Value};

use crate::{
    dto::orders::{NewOrder, OrderList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

pub fn list_orders(
    state: &AppState,
    _user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let mut orders: Vec<Order> = state
        .store
        .list_orders()
        .into_iter()
        .filter(|o| query.status.is_none_or(|status| o.status == status))
        .filter(|o| {
            query
                .customer_id
                .as_ref()
                .is_none_or(|customer| &o.customer_id == customer)
        })
        .collect();

    orders.sort_by(|a, b| a.order_date.cmp(&b.order_date));
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    if let SortOrder::Desc = sort_order {
        orders.reverse();
    }

    let (items, meta) = query.pagination().apply(orders);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub fn get_order(state: &AppState, _user: &AuthUser, id: &str) -> AppResult<ApiResponse<Order>> {
    let order = state.store.get_order(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Order found", order, Some(Meta::empty())))
}

pub fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: NewOrder,
) -> AppResult<ApiResponse<Order>> {
    let order = state.store.create_order(payload);
    tracing::info!(
        order_id = %order.id,
        customer_id = %order.customer_id,
        total = order.total,
        by = %user.email,
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

/// Fields in `patch` replace the stored ones wholesale; everything else is
/// kept.
pub fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Order>> {
    let order = state
        .store
        .update_order(id, patch)?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        order_id = %order.id,
        status = ?order.status,
        payment_status = ?order.payment_status,
        by = %user.email,
        "order updated"
    );

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}
