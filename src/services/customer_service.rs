use crate::{
    dto::customers::{CustomerList, NewCustomer},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Customer,
    response::{ApiResponse, Meta},
    routes::params::CustomerQuery,
    state::AppState,
};

pub fn list_customers(
    state: &AppState,
    _user: &AuthUser,
    query: CustomerQuery,
) -> AppResult<ApiResponse<CustomerList>> {
    let needle = query
        .q
        .as_ref()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase());

    let customers: Vec<Customer> = state
        .store
        .list_customers()
        .into_iter()
        .filter(|c| match &needle {
            Some(needle) => {
                let name = format!("{} {}", c.first_name, c.last_name).to_lowercase();
                name.contains(needle) || c.email.to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    let (items, meta) = query.pagination().apply(customers);
    Ok(ApiResponse::success("Customers", CustomerList { items }, Some(meta)))
}

pub fn get_customer(
    state: &AppState,
    _user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.store.get_customer(id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Customer", customer, Some(Meta::empty())))
}

pub fn create_customer(
    state: &AppState,
    user: &AuthUser,
    payload: NewCustomer,
) -> AppResult<ApiResponse<Customer>> {
    let customer = state.store.create_customer(payload);
    tracing::info!(customer_id = %customer.id, by = %user.email, "customer created");

    Ok(ApiResponse::success(
        "Customer created",
        customer,
        Some(Meta::empty()),
    ))
}
