pub mod api; // HTTP router, auth + audit middleware, server lifecycle
pub mod auth; // HS256 bearer tokens
pub mod config;
pub mod models;
pub mod risk; // Diabetes risk classifier

use tracing_subscriber::EnvFilter;

pub use models::{Gender, PatientInput, PatientRecord, RiskLevel};
pub use risk::{classify, RiskAssessment, RiskError};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `config::default_log_filter()`. Calling twice is a
/// no-op for the second call.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
