//! Slot arena with free/occupied bookkeeping and gap discovery
//!
//! The arena is a flat `Vec<Option<T>>`: a slot is either free (`None`) or
//! holds exactly one value. Callers address values by plain `usize` index and
//! are responsible for keeping those indices meaningful. Placement into an
//! occupied slot, or reading a free one through `Index`, is a broken upstream
//! invariant and panics.
//!
//! Gap discovery looks for the nearest run of free slots around an anchor
//! index. When nothing fits, the arena's [`GrowthPolicy`] decides between
//! failing with [`ArenaError::ArenaFull`] and doubling its capacity.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use thiserror::Error;

use crate::core::config::ArenaConfig;

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 4096;

/// What an arena does when no free run can satisfy a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Capacity never changes; exhausted requests fail with `ArenaFull`
    #[default]
    Fixed,
    /// Capacity doubles (starting from one slot) until the request fits
    Double,
}

/// Recoverable arena errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// No contiguous free run of the requested length exists
    #[error("Arena full: no free run of {requested} slots within capacity {capacity}")]
    ArenaFull {
        /// Number of contiguous slots requested
        requested: usize,
        /// Capacity of the arena at the time of the request
        capacity: usize,
    },
}

/// Fixed or growable index-addressed slot storage
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    occupied: usize,
    policy: GrowthPolicy,
}

impl<T> SlotArena<T> {
    /// Create a fixed-capacity arena with every slot free
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, GrowthPolicy::Fixed)
    }

    /// Create an arena from configuration
    pub fn from_config(config: &ArenaConfig) -> Self {
        Self::with_policy(config.capacity, config.growth)
    }

    /// Create an arena with an explicit growth policy
    pub fn with_policy(capacity: usize, policy: GrowthPolicy) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            occupied: 0,
            policy,
        }
    }

    /// Number of slots, free or occupied
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.occupied
    }

    /// True when no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// Growth policy applied by gap discovery
    pub fn policy(&self) -> GrowthPolicy {
        self.policy
    }

    /// True if `index` is in range and free
    pub fn is_free(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(None))
    }

    /// True if `index` is in range and occupied
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// True if a single value can be placed at `index`
    pub fn can_place(&self, index: usize) -> bool {
        self.is_free(index)
    }

    /// True if `[start, start + count)` is in range, non-empty and entirely free
    pub fn can_place_range(&self, start: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        match start.checked_add(count) {
            Some(end) if end <= self.slots.len() => {
                self.slots[start..end].iter().all(Option::is_none)
            }
            _ => false,
        }
    }

    /// Place a value into a free slot
    ///
    /// # Panics
    /// Panics if the slot is out of range or already occupied.
    pub fn place(&mut self, index: usize, value: T) {
        assert!(
            self.can_place(index),
            "cannot place at slot {index}: out of range or occupied (capacity {})",
            self.capacity()
        );
        self.slots[index] = Some(value);
        self.occupied += 1;
    }

    /// Place a sequence of values into consecutive free slots starting at `start`
    ///
    /// # Panics
    /// Panics if the sequence is empty or any target slot is out of range or occupied.
    pub fn place_range<I>(&mut self, start: usize, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        let count = values.len();
        assert!(
            self.can_place_range(start, count),
            "cannot place {count} values at slot {start}: out of range or occupied (capacity {})",
            self.capacity()
        );
        for (slot, value) in self.slots[start..start + count].iter_mut().zip(values) {
            *slot = Some(value);
        }
        self.occupied += count;
    }

    /// Mark `[start, start + count)` free and hand the values back
    ///
    /// # Panics
    /// Panics if any slot in the range is out of bounds or already free.
    pub fn vacate(&mut self, start: usize, count: usize) -> Vec<T> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.slots.len())
            .unwrap_or_else(|| {
                panic!(
                    "cannot vacate {count} slots at {start}: out of range (capacity {})",
                    self.slots.len()
                )
            });
        assert!(
            self.slots[start..end].iter().all(Option::is_some),
            "cannot vacate {count} slots at {start}: range contains free slots"
        );
        let values: Vec<T> = self.slots[start..end]
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        self.occupied -= values.len();
        values
    }

    /// Find the start of a free run of `count` slots nearest to `anchor`
    ///
    /// Runs are examined at growing distance from the anchor: the run starting
    /// `d` slots after it, then the run ending `d` slots before it. Forward
    /// runs win ties. If nothing fits, the growth policy either grows the
    /// arena and retries or fails.
    ///
    /// # Panics
    /// Panics if `count` is zero.
    pub fn find_gap_near(&mut self, count: usize, anchor: usize) -> Result<usize, ArenaError> {
        assert!(count > 0, "gap request must cover at least one slot");
        loop {
            if let Some(start) = self.scan_near(count, anchor) {
                return Ok(start);
            }
            self.grow_for(count)?;
        }
    }

    /// Find the lowest start index of a free run of `count` slots
    ///
    /// # Panics
    /// Panics if `count` is zero.
    pub fn find_gap(&mut self, count: usize) -> Result<usize, ArenaError> {
        assert!(count > 0, "gap request must cover at least one slot");
        loop {
            if let Some(start) = self.scan_lowest(count) {
                return Ok(start);
            }
            self.grow_for(count)?;
        }
    }

    /// Get a value by index, `None` if the slot is free or out of range
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    /// Get a mutable value by index, `None` if the slot is free or out of range
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    /// Raw view of every slot, in index order
    pub fn slots(&self) -> &[Option<T>] {
        &self.slots
    }

    /// Iterate occupied slots as `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }

    fn scan_lowest(&self, count: usize) -> Option<usize> {
        let mut run = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            if slot.is_some() {
                run = 0;
                continue;
            }
            run += 1;
            if run == count {
                return Some(index + 1 - count);
            }
        }
        None
    }

    fn scan_near(&self, count: usize, anchor: usize) -> Option<usize> {
        if count > self.slots.len() {
            return None;
        }
        let horizon = anchor.max(self.slots.len());
        for distance in 0..=horizon {
            if let Some(start) = anchor.checked_add(distance) {
                if self.can_place_range(start, count) {
                    return Some(start);
                }
            }
            if distance == 0 {
                continue;
            }
            let backward = anchor
                .checked_sub(distance)
                .and_then(|end| (end + 1).checked_sub(count));
            if let Some(start) = backward {
                if self.can_place_range(start, count) {
                    return Some(start);
                }
            }
        }
        None
    }

    fn grow_for(&mut self, count: usize) -> Result<(), ArenaError> {
        match self.policy {
            GrowthPolicy::Fixed => Err(ArenaError::ArenaFull {
                requested: count,
                capacity: self.capacity(),
            }),
            GrowthPolicy::Double => {
                let old_capacity = self.capacity();
                let new_capacity = old_capacity.saturating_mul(2).max(1);
                self.slots.resize_with(new_capacity, || None);
                log::info!(
                    "SlotArena grew from {} to {} slots (request for {} contiguous)",
                    old_capacity,
                    new_capacity,
                    count
                );
                Ok(())
            }
        }
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> Index<usize> for SlotArena<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
            .unwrap_or_else(|| panic!("slot {index} is free or out of range"))
    }
}

impl<T> IndexMut<usize> for SlotArena<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
            .unwrap_or_else(|| panic!("slot {index} is free or out of range"))
    }
}
