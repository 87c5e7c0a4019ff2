//! # Core Engine Module
//!
//! Shared abstractions used by the rest of the crate.
//!
//! ## Organization
//!
//! - **Config**: construction-time configuration for the scene store and logging

pub mod config;

// Re-export commonly used config types
pub use config::{
    ArenaConfig,
    Config,
    ConfigError,
    LoggingConfig,
    SceneConfig,
};
