//! Node record stored in each occupied arena slot

use std::ops::RangeInclusive;

bitflags::bitflags! {
    /// Hierarchy state bits of a node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// The node has no parent
        const ROOT = 1 << 0;
        /// `children_start..=children_end` is a live range
        const HAS_CHILDREN = 1 << 1;
    }
}

/// One node of the hierarchy: bookkeeping plus an opaque payload
///
/// Hierarchy fields are owned by [`HierarchyStore`](super::HierarchyStore)
/// and are read-only from outside the crate. The payload is never inspected
/// by the store and travels with the node when it is relocated.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<P> {
    pub(crate) parent_index: usize,
    pub(crate) children_start: usize,
    pub(crate) children_end: usize,
    pub(crate) flags: NodeFlags,
    payload: P,
}

impl<P> Node<P> {
    pub(crate) fn root(payload: P) -> Self {
        Self {
            parent_index: 0,
            children_start: 0,
            children_end: 0,
            flags: NodeFlags::ROOT,
            payload,
        }
    }

    pub(crate) fn child(parent_index: usize, payload: P) -> Self {
        Self {
            parent_index,
            children_start: 0,
            children_end: 0,
            flags: NodeFlags::empty(),
            payload,
        }
    }

    pub(crate) fn set_children(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end);
        self.children_start = start;
        self.children_end = end;
        self.flags.insert(NodeFlags::HAS_CHILDREN);
    }

    /// Index of the parent, `None` for roots
    pub fn parent_index(&self) -> Option<usize> {
        (!self.is_root()).then_some(self.parent_index)
    }

    /// First index of the children range
    pub fn children_start(&self) -> Option<usize> {
        self.has_children().then_some(self.children_start)
    }

    /// Last index (inclusive) of the children range
    pub fn children_end(&self) -> Option<usize> {
        self.has_children().then_some(self.children_end)
    }

    /// The contiguous range holding every direct child
    pub fn children_range(&self) -> Option<RangeInclusive<usize>> {
        self.has_children()
            .then(|| self.children_start..=self.children_end)
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        if self.has_children() {
            self.children_end - self.children_start + 1
        } else {
            0
        }
    }

    /// True if the node has no parent
    pub fn is_root(&self) -> bool {
        self.flags.contains(NodeFlags::ROOT)
    }

    /// True if the node owns a children range
    pub fn has_children(&self) -> bool {
        self.flags.contains(NodeFlags::HAS_CHILDREN)
    }

    /// Raw hierarchy flags
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Payload carried by this node
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable payload carried by this node
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }
}
