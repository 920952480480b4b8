pub mod calibration;
pub mod config;
mod error;
pub mod preset;
pub mod resolver;
pub mod tray;

pub use config::ResolverConfig;
pub use error::ResolverError;
pub use resolver::{
    FilamentResolver, FilamentSettingCommand, ResolutionInput, ResolutionResult,
};

/// Install the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG` (default `info`) and writes to stderr so
/// stdout stays machine-readable. Calling it more than once is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
