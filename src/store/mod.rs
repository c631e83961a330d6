//! In-memory storefront store.
//!
//! Five collections (products, categories, orders, customers, users) live for
//! the lifetime of the process behind a single lock. Nothing is durable.
//! Absent records come back as `None` / `false`; `StoreError` is reserved for
//! patches that no longer fit the record type and credential hashing.

mod fixtures;
mod merge;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    dto::{auth::NewUser, customers::NewCustomer, orders::NewOrder, products::NewProduct},
    models::{Analytics, Category, Customer, Order, Product, Role, User},
};

pub use fixtures::{sample_categories, sample_customer, sample_order, sample_products};

/// Reported by the dashboard instead of a measured value.
pub const CART_ABANDONMENT_RATE: f64 = 68.5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid patch: {0}")]
    InvalidPatch(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("email already registered: {0}")]
    DuplicateEmail(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Default)]
struct Collections {
    products: Vec<Product>,
    categories: Vec<Category>,
    orders: Vec<Order>,
    customers: Vec<Customer>,
    users: Vec<User>,
    last_id: i64,
}

impl Collections {
    /// Millisecond timestamp, bumped past the previous id when two calls land
    /// in the same millisecond.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

#[derive(Debug)]
pub struct Store {
    inner: RwLock<Collections>,
}

impl Store {
    /// Empty catalog with the two built-in staff accounts.
    pub fn new() -> StoreResult<Self> {
        let now = Utc::now();
        let users = vec![
            hashed_user("1".into(), staff("admin@storefront.local", "admin123", Role::Admin, "Admin"), now)?,
            hashed_user("2".into(), staff("manager@storefront.local", "manager123", Role::Manager, "Manager"), now)?,
        ];
        Ok(Self {
            inner: RwLock::new(Collections {
                users,
                ..Collections::default()
            }),
        })
    }

    // Products

    pub fn list_products(&self) -> Vec<Product> {
        self.inner.read().products.clone()
    }

    pub fn get_product(&self, id: &str) -> Option<Product> {
        self.inner.read().products.iter().find(|p| p.id == id).cloned()
    }

    pub fn create_product(&self, payload: NewProduct) -> Product {
        let mut inner = self.inner.write();
        let now = Utc::now();
        let product = product_from_payload(inner.next_id().to_string(), payload, now);
        inner.products.push(product.clone());
        product
    }

    pub fn update_product(&self, id: &str, patch: Map<String, Value>) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write();
        let Some(existing) = inner.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        let mut updated: Product = merge::shallow_merge(&*existing, patch)?;
        updated.updated_at = next_timestamp(existing.updated_at);
        *existing = updated.clone();
        Ok(Some(updated))
    }

    /// Orders that reference the product are left untouched.
    pub fn delete_product(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        inner.products.len() != before
    }

    // Categories

    pub fn list_categories(&self) -> Vec<Category> {
        self.inner.read().categories.clone()
    }

    pub fn get_category(&self, id: &str) -> Option<Category> {
        self.inner.read().categories.iter().find(|c| c.id == id).cloned()
    }

    // Orders

    pub fn list_orders(&self) -> Vec<Order> {
        self.inner.read().orders.clone()
    }

    pub fn get_order(&self, id: &str) -> Option<Order> {
        self.inner.read().orders.iter().find(|o| o.id == id).cloned()
    }

    /// The customer id is not checked against the customer collection.
    pub fn create_order(&self, payload: NewOrder) -> Order {
        let mut inner = self.inner.write();
        let now = Utc::now();
        let id = format!("ORD-{}", inner.next_id());
        let order = order_from_payload(id, payload, now);
        inner.orders.push(order.clone());
        order
    }

    pub fn update_order(&self, id: &str, patch: Map<String, Value>) -> StoreResult<Option<Order>> {
        let mut inner = self.inner.write();
        let Some(existing) = inner.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        let mut updated: Order = merge::shallow_merge(&*existing, patch)?;
        updated.updated_at = next_timestamp(existing.updated_at);
        *existing = updated.clone();
        Ok(Some(updated))
    }

    // Customers

    pub fn list_customers(&self) -> Vec<Customer> {
        self.inner.read().customers.clone()
    }

    pub fn get_customer(&self, id: &str) -> Option<Customer> {
        self.inner.read().customers.iter().find(|c| c.id == id).cloned()
    }

    pub fn create_customer(&self, payload: NewCustomer) -> Customer {
        let mut inner = self.inner.write();
        let now = Utc::now();
        let customer = customer_from_payload(inner.next_id().to_string(), payload, now);
        inner.customers.push(customer.clone());
        customer
    }

    // Users

    /// Exact, case-sensitive match.
    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.inner.read().users.iter().find(|u| u.email == email).cloned()
    }

    pub fn get_user_by_id(&self, id: &str) -> Option<User> {
        self.inner.read().users.iter().find(|u| u.id == id).cloned()
    }

    /// Adds an account. Emails are unique; the hash is computed before the
    /// lock is taken.
    pub fn insert_user(&self, payload: NewUser) -> StoreResult<User> {
        let email = payload.email.clone();
        let now = Utc::now();
        let mut user = hashed_user(String::new(), payload, now)?;

        let mut inner = self.inner.write();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email));
        }
        user.id = inner.next_id().to_string();
        inner.users.push(user.clone());
        tracing::info!(user_id = %user.id, role = ?user.role, "user added");
        Ok(user)
    }

    // Analytics

    pub fn analytics(&self) -> Analytics {
        let inner = self.inner.read();
        let total_sales = inner.orders.iter().map(|o| o.total).sum();
        let total_orders = inner.orders.len();
        let total_customers = inner.customers.len();
        let conversion_rate = if total_customers > 0 {
            total_orders as f64 / total_customers as f64 * 100.0
        } else {
            0.0
        };
        Analytics {
            total_sales,
            total_orders,
            total_customers,
            total_products: inner.products.len(),
            conversion_rate,
            cart_abandonment_rate: CART_ABANDONMENT_RATE,
        }
    }

    /// Seeds the catalog from fixtures when there are no products yet, and
    /// replaces orders and customers with the single fixture order and
    /// customer. Returns whether anything was seeded.
    ///
    /// The whole step runs under the write lock, so a concurrent create lands
    /// either before (and is replaced) or after (and is kept).
    pub fn initialize_sample_data(&self) -> bool {
        let mut inner = self.inner.write();
        if !inner.products.is_empty() {
            return false;
        }
        let now = Utc::now();

        let products: Vec<Product> = sample_products()
            .into_iter()
            .enumerate()
            .map(|(i, p)| product_from_payload((i + 1).to_string(), p, now))
            .collect();
        let categories: Vec<Category> = sample_categories()
            .into_iter()
            .enumerate()
            .map(|(i, c)| Category {
                id: (i + 1).to_string(),
                name: c.name,
                image: c.image,
                description: c.description,
                icon: c.icon,
                product_count: c.product_count,
                featured: c.featured,
                created_at: now,
                updated_at: now,
            })
            .collect();

        inner.products = products;
        inner.categories = categories;
        inner.orders = vec![order_from_payload("ORD-001".into(), sample_order(now), now)];
        inner.customers = vec![customer_from_payload("1".into(), sample_customer(now), now)];

        tracing::info!(
            products = inner.products.len(),
            categories = inner.categories.len(),
            "sample data initialized"
        );
        true
    }
}

/// `now`, or one microsecond past `prev` if the clock has not moved on.
fn next_timestamp(prev: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > prev {
        now
    } else {
        prev + Duration::microseconds(1)
    }
}

fn product_from_payload(id: String, p: NewProduct, now: DateTime<Utc>) -> Product {
    Product {
        id,
        name: p.name,
        price: p.price,
        original_price: p.original_price,
        image: p.image,
        category: p.category,
        description: p.description,
        images: p.images,
        rating: p.rating,
        reviews: p.reviews,
        in_stock: p.in_stock,
        brand: p.brand,
        features: p.features,
        specifications: p.specifications,
        created_at: now,
        updated_at: now,
    }
}

fn order_from_payload(id: String, o: NewOrder, now: DateTime<Utc>) -> Order {
    Order {
        id,
        customer_id: o.customer_id,
        items: o.items,
        total: o.total,
        status: o.status,
        payment_status: o.payment_status,
        shipping_address: o.shipping_address,
        order_date: o.order_date,
        delivery_date: o.delivery_date,
        tracking_number: o.tracking_number,
        created_at: now,
        updated_at: now,
    }
}

fn customer_from_payload(id: String, c: NewCustomer, now: DateTime<Utc>) -> Customer {
    Customer {
        id,
        first_name: c.first_name,
        last_name: c.last_name,
        email: c.email,
        phone: c.phone,
        avatar: c.avatar,
        join_date: c.join_date,
        total_orders: c.total_orders,
        total_spent: c.total_spent,
        loyalty_points: c.loyalty_points,
        created_at: now,
        updated_at: now,
    }
}

fn staff(email: &str, password: &str, role: Role, last_name: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: password.to_string(),
        role,
        first_name: "Store".to_string(),
        last_name: last_name.to_string(),
        is_active: true,
    }
}

fn hashed_user(id: String, u: NewUser, now: DateTime<Utc>) -> StoreResult<User> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(u.password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(User {
        id,
        email: u.email,
        password_hash,
        role: u.role,
        first_name: u.first_name,
        last_name: u.last_name,
        is_active: u.is_active,
        created_at: now,
        updated_at: now,
    })
}
