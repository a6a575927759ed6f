mod health;
mod metrics;
mod todos;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use todos::{create_todo, delete_todo, list_todos, not_found_handler, update_todo};
