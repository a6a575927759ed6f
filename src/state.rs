use crate::config::ServiceConfig;
use crate::rate_limit::RateLimiter;
use crate::store::TodoStore;

// app's shared state, one instance per running service
pub struct AppState {
    pub store: TodoStore,
    pub rate_limiter: RateLimiter,
    pub config: ServiceConfig,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            store: TodoStore::new(),
            rate_limiter: RateLimiter::new(config.rate_limit, config.rate_window),
            config,
        }
    }
}
