//! Scene hierarchy
//!
//! An arena-backed object store in which every node's direct children occupy
//! one contiguous run of indices. Transform propagation, culling and rendering
//! can then iterate children as a flat range instead of following pointers.
//!
//! ## Layout
//!
//! ```text
//! index:    0      1      2      3      4      5      6
//! slot:   [sun] [free] [free] [comet] [earth] [mars] [venus]
//!           |                           ^             ^
//!           +-- children 4..=6 ---------+-------------+
//! ```
//!
//! ## Consumer contract
//!
//! A pre-order walk can, for any node, scan `children_start..=children_end`
//! to reach every direct child, computing each child's world transform as
//! `parent_world * local` and recursing. Nodes may move while the scene is
//! being built, so indices are only stable between mutations.

mod hierarchy;
mod node;
mod object;
mod traverse;
mod validate;

#[cfg(test)]
mod tests;

pub use hierarchy::{HierarchyStats, HierarchyStore};
pub use node::{Node, NodeFlags};
pub use object::{Color, SceneObject};
pub use traverse::{Children, PreOrder};
pub use validate::InvariantViolation;
