mod gists;
mod health;
mod metrics;
mod root;

pub use gists::gists_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use root::root_handler;
