//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Slot arena storage
//! - Math types and operations
//! - Logging utilities

pub mod arena;
pub mod math;
pub mod logging;

pub use arena::{ArenaError, GrowthPolicy, SlotArena, DEFAULT_CAPACITY};
