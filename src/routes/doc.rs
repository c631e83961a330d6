use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse},
        customers::{CustomerList, NewCustomer},
        orders::{NewOrder, OrderList},
        patch::FieldPatch,
        products::{CategoryList, NewProduct, ProductList},
    },
    models::{
        Analytics, Category, Customer, Order, OrderItem, OrderStatus, PaymentStatus, Product,
        Role, ShippingAddress, User,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, categories, customers, health, orders, params, products},
    services::admin_service::SampleDataResult,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("admin-token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::logout,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::get_category,
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::update_order,
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        admin::login_page,
        admin::dashboard,
        admin::analytics,
        admin::me,
        admin::sample_data
    ),
    components(
        schemas(
            User,
            Role,
            Product,
            Category,
            Order,
            OrderItem,
            OrderStatus,
            PaymentStatus,
            ShippingAddress,
            Customer,
            Analytics,
            NewProduct,
            NewOrder,
            NewCustomer,
            FieldPatch,
            LoginRequest,
            LoginResponse,
            ProductList,
            CategoryList,
            OrderList,
            CustomerList,
            SampleDataResult,
            admin::LoginPage,
            params::Pagination,
            params::SortOrder,
            params::ProductSortBy,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<OrderList>,
            ApiResponse<Analytics>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Public catalog endpoints"),
        (name = "Orders", description = "Order management"),
        (name = "Customers", description = "Customer management"),
        (name = "Admin", description = "Admin console endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
