//! Structural audit of a hierarchy store
//!
//! Checks the contiguity, ownership and root-flag invariants that every
//! public operation must preserve. Used by tests and by applications that
//! want to assert a scene is well formed after construction.

use thiserror::Error;

use super::hierarchy::HierarchyStore;

/// A broken hierarchy invariant, with the indices involved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A children range ends before it starts
    #[error("node {owner} has inverted children range {start}..={end}")]
    InvertedRange {
        /// Owning node
        owner: usize,
        /// Recorded start
        start: usize,
        /// Recorded end
        end: usize,
    },

    /// A children range reaches past the arena
    #[error("node {owner} lists child {child} beyond capacity {capacity}")]
    ChildOutsideArena {
        /// Owning node
        owner: usize,
        /// Offending index
        child: usize,
        /// Arena capacity
        capacity: usize,
    },

    /// A slot inside a children range is free
    #[error("node {owner} lists free slot {child} as a child")]
    ChildSlotFree {
        /// Owning node
        owner: usize,
        /// Free slot
        child: usize,
    },

    /// A child does not point back at the node whose range holds it
    #[error("child {child} records parent {found}, expected {expected}")]
    ParentMismatch {
        /// Child index
        child: usize,
        /// Owner of the range holding the child
        expected: usize,
        /// Parent recorded on the child
        found: usize,
    },

    /// A slot belongs to two children ranges
    #[error("slot {child} is claimed by both {first} and {second}")]
    OverlappingRanges {
        /// Contested slot
        child: usize,
        /// First claimant
        first: usize,
        /// Second claimant
        second: usize,
    },

    /// A node's children range includes the node itself
    #[error("node {owner} lies inside its own children range")]
    RangeCoversOwner {
        /// Owning node
        owner: usize,
    },

    /// A node flagged as root sits in some children range
    #[error("root {index} is listed as a child of {owner}")]
    RootFlagMismatch {
        /// Root node
        index: usize,
        /// Node whose range holds it
        owner: usize,
    },

    /// A non-root node is not inside its parent's children range
    #[error("node {index} claims parent {parent} but is not in its children range")]
    OrphanChild {
        /// Child index
        index: usize,
        /// Parent recorded on the child
        parent: usize,
    },
}

impl<P> HierarchyStore<P> {
    /// Check every structural invariant, reporting the first violation found
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let arena = self.arena();
        let capacity = arena.capacity();
        let mut owner_of: Vec<Option<usize>> = vec![None; capacity];

        for (owner, node) in arena.iter() {
            if !node.has_children() {
                continue;
            }
            let (start, end) = (node.children_start, node.children_end);
            if start > end {
                return Err(InvariantViolation::InvertedRange { owner, start, end });
            }
            if (start..=end).contains(&owner) {
                return Err(InvariantViolation::RangeCoversOwner { owner });
            }
            for child in start..=end {
                if child >= capacity {
                    return Err(InvariantViolation::ChildOutsideArena {
                        owner,
                        child,
                        capacity,
                    });
                }
                let Some(child_node) = arena.get(child) else {
                    return Err(InvariantViolation::ChildSlotFree { owner, child });
                };
                if let Some(first) = owner_of[child] {
                    return Err(InvariantViolation::OverlappingRanges {
                        child,
                        first,
                        second: owner,
                    });
                }
                if child_node.is_root() {
                    return Err(InvariantViolation::RootFlagMismatch { index: child, owner });
                }
                if child_node.parent_index != owner {
                    return Err(InvariantViolation::ParentMismatch {
                        child,
                        expected: owner,
                        found: child_node.parent_index,
                    });
                }
                owner_of[child] = Some(owner);
            }
        }

        for (index, node) in arena.iter() {
            if node.is_root() {
                continue;
            }
            if owner_of[index] != Some(node.parent_index) {
                return Err(InvariantViolation::OrphanChild {
                    index,
                    parent: node.parent_index,
                });
            }
        }

        Ok(())
    }
}
