//! Tree traversal utilities.
//!
//! Both iterators only scan `children_start..=children_end`; they never follow
//! parent links. This is the access pattern transform propagation, culling and
//! rendering rely on.

use std::ops::Range;

use super::hierarchy::HierarchyStore;
use super::node::Node;

/// An iterator over the direct children of a node.
///
/// Created by [`HierarchyStore::children`].
#[derive(Debug)]
pub struct Children<'a, P> {
    store: &'a HierarchyStore<P>,
    range: Range<usize>,
}

impl<'a, P> Iterator for Children<'a, P> {
    type Item = (usize, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        Some((index, &self.store[index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<P> ExactSizeIterator for Children<'_, P> {}

/// A depth-first pre-order walk over a subtree.
///
/// Yields `(index, depth, node)` with the subtree root at depth 0; siblings
/// are visited in index order. Created by [`HierarchyStore::walk`].
#[derive(Debug)]
pub struct PreOrder<'a, P> {
    store: &'a HierarchyStore<P>,
    stack: Vec<(usize, usize)>,
}

impl<'a, P> Iterator for PreOrder<'a, P> {
    type Item = (usize, usize, &'a Node<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, depth) = self.stack.pop()?;
        let node = &self.store[index];
        if let Some(range) = node.children_range() {
            self.stack.extend(range.rev().map(|child| (child, depth + 1)));
        }
        Some((index, depth, node))
    }
}

impl<P> HierarchyStore<P> {
    /// Iterate the direct children of `index` as `(child_index, node)`
    ///
    /// # Panics
    /// Panics if `index` is a free slot.
    pub fn children(&self, index: usize) -> Children<'_, P> {
        let range = match self[index].children_range() {
            Some(range) => *range.start()..*range.end() + 1,
            None => 0..0,
        };
        Children { store: self, range }
    }

    /// Walk the subtree rooted at `index` in pre-order
    ///
    /// # Panics
    /// Panics if `index` is a free slot.
    pub fn walk(&self, index: usize) -> PreOrder<'_, P> {
        assert!(
            self.get(index).is_some(),
            "cannot walk from free slot {index}"
        );
        PreOrder {
            store: self,
            stack: vec![(index, 0)],
        }
    }

    /// Walk every root's subtree in pre-order, roots in index order
    pub fn walk_all(&self) -> impl Iterator<Item = (usize, usize, &Node<P>)> + '_ {
        self.roots().flat_map(move |root| self.walk(root))
    }
}
