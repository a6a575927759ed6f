use lazy_static::lazy_static;
use prometheus::proto::MetricFamily;
use prometheus::{Counter, Gauge, Histogram, Registry, register_counter, register_histogram};

// Process-wide traffic counters
lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("todo_requests_total", "Total number of requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter =
        register_counter!("todo_rate_limited_total", "Requests refused by the rate limiter").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "todo_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}

// Per-instance gauges, built at scrape time from that instance's own store
pub fn instance_families(todo_count: usize) -> prometheus::Result<Vec<MetricFamily>> {
    let registry = Registry::new();
    let todo_items = Gauge::new("todo_items", "Current number of todos in the store")?;
    todo_items.set(todo_count as f64);
    registry.register(Box::new(todo_items))?;
    Ok(registry.gather())
}
