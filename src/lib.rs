//! Ballot Processing & Tally Engine
//!
//! Turns a voter's raw selections into a validated, durably recorded,
//! exactly-once vote and maintains the aggregate counts used for
//! reporting. The surrounding election-management application handles
//! authentication, record CRUD and rendering; it calls into this crate
//! through the [`engine::Engine`] facade.

pub mod ballot;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod recorder;
pub mod seed;
pub mod store;
pub mod tally;
pub mod types;

// Re-export commonly used types
pub use engine::Engine;
pub use errors::{Error, Result};
pub use store::ElectionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the engine's logging with default settings
pub fn init() -> Result<()> {
    init_with(&config::LoggingConfig::default())
}

/// Initialize the engine's logging from configuration
///
/// The configured level seeds the engine's log target; a `RUST_LOG`
/// environment filter takes precedence when set. `format` selects "pretty"
/// or "json" (the default) output.
pub fn init_with(logging: &config::LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("ballot={}", logging.level)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format == "pretty" {
        builder.pretty().init();
    } else {
        builder.json().init();
    }

    tracing::info!("🗳️  Ballot engine v{} initialized", VERSION);
    Ok(())
}
