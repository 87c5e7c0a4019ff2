//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    // Already initialized elsewhere; keep the existing logger.
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a default filter such as `"debug"`
/// or `"scene_engine=trace"`; `RUST_LOG` still takes precedence.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
