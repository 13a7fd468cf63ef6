// Gateway module - controls public API for handlers
// Modules are private, only exported symbols are public

mod health;
mod metrics;
mod ready;
mod request_metrics;
mod root;
mod shared_types;
mod visits;

// Health and observability
pub use health::health_check;
pub use metrics::metrics_handler;
pub use ready::readiness_check;
pub use request_metrics::track_requests;
pub use root::root_handler;

// Visit counter handlers
pub use visits::{get_visits, increment_visits};
