//! # Scene Engine
//!
//! Arena-backed scene hierarchy for real-time engines.
//!
//! Nodes live in a flat, index-addressed arena. Every node's direct children
//! occupy a single contiguous run of indices, so transform propagation,
//! culling and rendering can scan children as a range with no pointer
//! chasing.
//!
//! ## Features
//!
//! - **Slot Arena**: fixed or doubling capacity, nearest-gap discovery
//! - **Contiguous Children**: in-place appends, batched inserts, minimal relocation
//! - **Traversal**: child scans and pre-order walks over the flat layout
//! - **Configuration**: TOML/RON scene configuration
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), ArenaError> {
//!     let mut scene: HierarchyStore = HierarchyStore::from_config(&ArenaConfig::new(64));
//!
//!     let sun = scene.add_root(SceneObject::new())?;
//!     let earth = scene.add_child(sun, SceneObject::new().with_position(Vec3::new(5.0, 0.0, 0.0)))?;
//!     scene.add_child(earth, SceneObject::new().with_position(Vec3::new(1.0, 0.0, 0.0)))?;
//!
//!     for (index, node) in scene.children(sun) {
//!         assert_eq!(node.parent_index(), Some(sun));
//!         assert_eq!(index, earth);
//!     }
//!     assert!(scene.validate().is_ok());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod core;

pub mod config;
pub mod foundation;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ArenaConfig, Config, ConfigError, LoggingConfig, SceneConfig},
        foundation::{
            arena::{ArenaError, GrowthPolicy, SlotArena},
            math::{Mat4, Transform, Vec3},
        },
        scene::{Color, HierarchyStats, HierarchyStore, InvariantViolation, Node, SceneObject},
    };
}
