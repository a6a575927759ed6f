// Request order: security -> rate_limit -> cors -> handler (see crate::app)
pub mod cors;
pub mod rate_limit;
pub mod security;

pub use cors::cors_layer;
pub use rate_limit::rate_limit_middleware;
pub use security::security_headers;
