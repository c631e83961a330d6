use std::sync::Arc;

use crate::{config::AppConfig, middleware::route_guard::RouteGuard, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<AppConfig>,
    pub guard: Arc<RouteGuard>,
}

impl AppState {
    pub fn new(store: Store, config: AppConfig) -> Self {
        let guard = RouteGuard::new(&config.jwt_secret);
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            guard: Arc::new(guard),
        }
    }
}
