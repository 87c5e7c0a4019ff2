//! Contiguous-children hierarchy store
//!
//! Every node's direct children occupy one contiguous index range of the
//! underlying [`SlotArena`]. Consumers can therefore visit the children of any
//! node by scanning `children_start..=children_end` with no indirection.
//!
//! Insertion keeps that invariant with as little data movement as possible:
//!
//! 1. A parent without children gets a fresh run as close to it as possible.
//! 2. A parent whose range can be extended in place gets the new children
//!    appended directly after its last child.
//! 3. Otherwise the existing children are moved, in order, into a new run
//!    large enough for old and new children together. Each moved child that
//!    has children of its own gets their `parent_index` retargeted. Nothing
//!    deeper changes because only the moved child's index changed.
//!
//! Every gap is found before any slot is touched, so a failed insertion leaves
//! the store exactly as it was.

use std::ops::{Index, IndexMut};

use super::node::Node;
use super::object::SceneObject;
use crate::core::config::ArenaConfig;
use crate::foundation::arena::{ArenaError, GrowthPolicy, SlotArena, DEFAULT_CAPACITY};

/// Counters describing how much data movement insertions caused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyStats {
    /// Number of children ranges moved to a new gap
    pub relocations: u64,
    /// Total nodes moved by relocations
    pub relocated_nodes: u64,
    /// `parent_index` fields rewritten on children of moved nodes
    pub parent_fixups: u64,
}

/// Arena-backed hierarchy whose children ranges are always contiguous
#[derive(Debug, Clone)]
pub struct HierarchyStore<P = SceneObject> {
    arena: SlotArena<Node<P>>,
    stats: HierarchyStats,
}

impl<P> HierarchyStore<P> {
    /// Create a store over a fixed arena of `capacity` slots
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, GrowthPolicy::Fixed)
    }

    /// Create a store with an explicit growth policy
    pub fn with_policy(capacity: usize, policy: GrowthPolicy) -> Self {
        Self {
            arena: SlotArena::with_policy(capacity, policy),
            stats: HierarchyStats::default(),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &ArenaConfig) -> Self {
        log::debug!(
            "Creating HierarchyStore with capacity {} ({:?} growth)",
            config.capacity,
            config.growth
        );
        Self {
            arena: SlotArena::from_config(config),
            stats: HierarchyStats::default(),
        }
    }

    /// Add a parentless node in the lowest free slot
    pub fn add_root(&mut self, payload: P) -> Result<usize, ArenaError> {
        let index = self.arena.find_gap(1).map_err(|err| {
            log::warn!("Cannot add root: {}", err);
            err
        })?;
        self.arena.place(index, Node::root(payload));
        log::trace!("Placed root at {}", index);
        Ok(index)
    }

    /// Add one child to `parent` and return the index it ends up at
    ///
    /// # Panics
    /// Panics if `parent` does not reference an occupied node.
    pub fn add_child(&mut self, parent: usize, payload: P) -> Result<usize, ArenaError> {
        self.insert_children(parent, vec![payload])
    }

    /// Add a batch of children to `parent` with at most one relocation
    ///
    /// Returns the parent's (possibly new) first child index.
    ///
    /// # Panics
    /// Panics if `parent` does not reference an occupied node or the batch is empty.
    pub fn add_children<I>(&mut self, parent: usize, payloads: I) -> Result<usize, ArenaError>
    where
        I: IntoIterator<Item = P>,
    {
        let payloads: Vec<P> = payloads.into_iter().collect();
        self.insert_children(parent, payloads)?;
        Ok(self.arena[parent].children_start)
    }

    /// Places `payloads` as the last children of `parent`; returns the index
    /// of the first newly placed child.
    fn insert_children(&mut self, parent: usize, payloads: Vec<P>) -> Result<usize, ArenaError> {
        let count = payloads.len();
        assert!(count > 0, "cannot add an empty batch of children");
        let existing = self
            .arena
            .get(parent)
            .unwrap_or_else(|| panic!("parent index {parent} does not reference an occupied node"))
            .children_range();

        let (first_new, start) = match existing {
            None => {
                let start = self.gap_near(count, parent)?;
                (start, start)
            }
            Some(range) if self.arena.can_place_range(range.end() + 1, count) => {
                (range.end() + 1, *range.start())
            }
            Some(range) => {
                let existing_count = range.end() - range.start() + 1;
                let new_start = self.gap_near(existing_count + count, parent)?;
                self.relocate_children(parent, *range.start(), existing_count, new_start);
                (new_start + existing_count, new_start)
            }
        };

        self.arena.place_range(
            first_new,
            payloads.into_iter().map(|payload| Node::child(parent, payload)),
        );
        self.arena[parent].set_children(start, first_new + count - 1);
        log::trace!(
            "Placed {} children of {} at {}..={}",
            count,
            parent,
            first_new,
            first_new + count - 1
        );
        Ok(first_new)
    }

    fn gap_near(&mut self, count: usize, anchor: usize) -> Result<usize, ArenaError> {
        self.arena.find_gap_near(count, anchor).map_err(|err| {
            log::warn!("Cannot place {} children near {}: {}", count, anchor, err);
            err
        })
    }

    /// Moves `count` children of `parent` from `from` to the free run at `to`.
    fn relocate_children(&mut self, parent: usize, from: usize, count: usize, to: usize) {
        let moved = self.arena.vacate(from, count);
        self.arena.place_range(to, moved);

        // One level only: grandchildren ranges did not move.
        let mut fixups = 0;
        for index in to..to + count {
            if let Some(range) = self.arena[index].children_range() {
                for grandchild in range {
                    self.arena[grandchild].parent_index = index;
                    fixups += 1;
                }
            }
        }

        self.stats.relocations += 1;
        self.stats.relocated_nodes += count as u64;
        self.stats.parent_fixups += fixups;
        log::debug!(
            "Relocated {} children of {} from {}..={} to {}..={} ({} parent fix-ups)",
            count,
            parent,
            from,
            from + count - 1,
            to,
            to + count - 1,
            fixups
        );
    }

    /// Get a node by index, `None` if the slot is free
    pub fn get(&self, index: usize) -> Option<&Node<P>> {
        self.arena.get(index)
    }

    /// Get a mutable node by index, `None` if the slot is free
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node<P>> {
        self.arena.get_mut(index)
    }

    /// Payload of an occupied node
    ///
    /// # Panics
    /// Panics if the slot is free.
    pub fn payload(&self, index: usize) -> &P {
        self.arena[index].payload()
    }

    /// Mutable payload of an occupied node
    ///
    /// # Panics
    /// Panics if the slot is free.
    pub fn payload_mut(&mut self, index: usize) -> &mut P {
        self.arena[index].payload_mut()
    }

    /// Indices of every root node, in index order
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(index, _)| index)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// True if the store holds no nodes
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Current number of slots
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Relocation counters since construction
    pub fn stats(&self) -> HierarchyStats {
        self.stats
    }

    /// Read-only view of the underlying arena
    pub fn arena(&self) -> &SlotArena<Node<P>> {
        &self.arena
    }
}

impl<P> Default for HierarchyStore<P> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<P> Index<usize> for HierarchyStore<P> {
    type Output = Node<P>;

    fn index(&self, index: usize) -> &Node<P> {
        &self.arena[index]
    }
}

impl<P> IndexMut<usize> for HierarchyStore<P> {
    fn index_mut(&mut self, index: usize) -> &mut Node<P> {
        &mut self.arena[index]
    }
}
