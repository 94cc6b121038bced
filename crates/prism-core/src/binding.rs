// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Dirty-tracked state containers.
//!
//! Each container remembers whether it changed since the last flush. `set*`
//! marks it dirty, `consume` hands the change out exactly once. A flush that
//! may fail reads the change with `pending` and calls `mark_clean` only once
//! the change was applied. Containers start dirty so the first flush applies
//! the initial state.

use crate::error::ContextError;
use std::ops::Range;

/// A single dirty-tracked value.
#[derive(Debug, Clone)]
pub struct DirtyValue<T> {
    value: T,
    dirty: bool,
}

impl<T: PartialEq> DirtyValue<T> {
    /// Creates a dirty value.
    pub fn new(value: T) -> Self {
        Self { value, dirty: true }
    }

    /// Replaces the value. Setting an equal value leaves a clean value clean.
    pub fn set(&mut self, value: T) {
        if self.value != value {
            self.value = value;
            self.dirty = true;
        }
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether the value changed since the last [`consume`](Self::consume).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the value if it changed, leaving it dirty.
    pub fn pending(&self) -> Option<&T> {
        self.dirty.then_some(&self.value)
    }

    /// Marks the current value as applied.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Returns the value if it changed, and marks it clean.
    pub fn consume(&mut self) -> Option<&T> {
        if std::mem::take(&mut self.dirty) {
            Some(&self.value)
        } else {
            None
        }
    }
}

impl<T: PartialEq + Default> Default for DirtyValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A fixed-capacity slot array where writes accumulate into one dirty range.
///
/// Two writes to slots 2 and 5 flush as one update of slots 2..6.
#[derive(Debug, Clone)]
pub struct CumulativeArrayBinding<T> {
    group: &'static str,
    slots: Vec<T>,
    dirty: Option<Range<usize>>,
}

impl<T: Clone + Default + PartialEq> CumulativeArrayBinding<T> {
    /// Creates `capacity` default slots, all dirty.
    pub fn new(group: &'static str, capacity: usize) -> Self {
        Self {
            group,
            slots: vec![T::default(); capacity],
            dirty: (capacity > 0).then_some(0..capacity),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes consecutive slots starting at `first`.
    pub fn set_range(&mut self, first: usize, values: &[T]) -> Result<(), ContextError> {
        let end = first.saturating_add(values.len());
        if end > self.slots.len() {
            return Err(ContextError::SlotOutOfRange {
                group: self.group,
                end,
                capacity: self.slots.len(),
            });
        }
        let mut changed: Option<Range<usize>> = None;
        for (offset, value) in values.iter().enumerate() {
            let slot = first + offset;
            if self.slots[slot] != *value {
                self.slots[slot] = value.clone();
                changed = Some(match changed {
                    Some(range) => range.start..slot + 1,
                    None => slot..slot + 1,
                });
            }
        }
        if let Some(changed) = changed {
            self.dirty = Some(match self.dirty.take() {
                Some(range) => range.start.min(changed.start)..range.end.max(changed.end),
                None => changed,
            });
        }
        Ok(())
    }

    /// Writes one slot.
    pub fn set(&mut self, slot: usize, value: T) -> Result<(), ContextError> {
        self.set_range(slot, std::slice::from_ref(&value))
    }

    /// The value of one slot.
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    /// All slots.
    pub fn slots(&self) -> &[T] {
        &self.slots
    }

    /// The dirty range, if any.
    pub fn dirty_range(&self) -> Option<Range<usize>> {
        self.dirty.clone()
    }

    /// Returns the first dirty slot and the dirty slots, leaving them dirty.
    pub fn pending(&self) -> Option<(usize, &[T])> {
        let range = self.dirty.clone()?;
        Some((range.start, &self.slots[range]))
    }

    /// Marks every slot as applied.
    pub fn mark_clean(&mut self) {
        self.dirty = None;
    }

    /// Returns the first dirty slot and the dirty slots, and marks the group clean.
    pub fn consume(&mut self) -> Option<(usize, &[T])> {
        let range = self.dirty.take()?;
        Some((range.start, &self.slots[range]))
    }
}

/// A bounded list that is always replaced as a whole, such as viewports or
/// render targets.
#[derive(Debug, Clone)]
pub struct ResettingArrayBinding<T> {
    group: &'static str,
    capacity: usize,
    values: Vec<T>,
    dirty: bool,
}

impl<T: Clone + PartialEq> ResettingArrayBinding<T> {
    /// Creates an empty, dirty group that holds up to `capacity` values.
    pub fn new(group: &'static str, capacity: usize) -> Self {
        Self {
            group,
            capacity,
            values: Vec::new(),
            dirty: true,
        }
    }

    /// Replaces the whole group.
    pub fn set(&mut self, values: &[T]) -> Result<(), ContextError> {
        if values.len() > self.capacity {
            return Err(ContextError::SlotOutOfRange {
                group: self.group,
                end: values.len(),
                capacity: self.capacity,
            });
        }
        if self.values != values {
            self.values = values.to_vec();
            self.dirty = true;
        }
        Ok(())
    }

    /// The current values.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Whether the group changed since the last [`consume`](Self::consume).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the whole group if it changed, leaving it dirty.
    pub fn pending(&self) -> Option<&[T]> {
        self.dirty.then_some(&self.values[..])
    }

    /// Marks the group as applied.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Returns the whole group if it changed, and marks it clean.
    pub fn consume(&mut self) -> Option<&[T]> {
        if std::mem::take(&mut self.dirty) {
            Some(&self.values)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_value_consumes_once() {
        let mut value = DirtyValue::new(1);
        assert_eq!(value.consume(), Some(&1));
        assert_eq!(value.consume(), None);
        value.set(1);
        assert!(!value.is_dirty());
        value.set(2);
        assert_eq!(value.consume(), Some(&2));
        assert_eq!(value.consume(), None);
    }

    #[test]
    fn cumulative_writes_merge_into_one_range() {
        let mut binding = CumulativeArrayBinding::<Option<u32>>::new("samplers", 8);
        assert_eq!(binding.consume().map(|(first, s)| (first, s.len())), Some((0, 8)));

        binding.set(5, Some(50)).unwrap();
        binding.set(2, Some(20)).unwrap();
        assert_eq!(binding.dirty_range(), Some(2..6));
        let (first, slots) = binding.consume().unwrap();
        assert_eq!(first, 2);
        assert_eq!(slots, [Some(20), None, None, Some(50)]);
        assert!(binding.consume().is_none());
    }

    #[test]
    fn cumulative_ignores_unchanged_writes() {
        let mut binding = CumulativeArrayBinding::<Option<u32>>::new("srvs", 4);
        binding.consume();
        binding.set_range(0, &[None, None]).unwrap();
        assert!(binding.consume().is_none());
    }

    #[test]
    fn cumulative_rejects_out_of_range_writes() {
        let mut binding = CumulativeArrayBinding::<Option<u32>>::new("uniform buffers", 2);
        let error = binding.set_range(1, &[Some(1), Some(2)]).unwrap_err();
        assert_eq!(
            error,
            ContextError::SlotOutOfRange {
                group: "uniform buffers",
                end: 3,
                capacity: 2
            }
        );
    }

    #[test]
    fn cumulative_rejects_writes_past_the_address_space() {
        let mut binding = CumulativeArrayBinding::<Option<u32>>::new("srvs", 4);
        let error = binding.set_range(usize::MAX, &[Some(1), Some(2)]).unwrap_err();
        assert_eq!(
            error,
            ContextError::SlotOutOfRange {
                group: "srvs",
                end: usize::MAX,
                capacity: 4
            }
        );
    }

    #[test]
    fn pending_changes_stay_dirty_until_marked_clean() {
        let mut value = DirtyValue::new(3);
        assert_eq!(value.pending(), Some(&3));
        assert_eq!(value.pending(), Some(&3));
        value.mark_clean();
        assert_eq!(value.pending(), None);

        let mut slots = CumulativeArrayBinding::<Option<u32>>::new("uavs", 4);
        slots.mark_clean();
        slots.set(1, Some(9)).unwrap();
        assert_eq!(slots.pending(), Some((1, &[Some(9)][..])));
        assert_eq!(slots.dirty_range(), Some(1..2));
        slots.mark_clean();
        assert!(slots.pending().is_none());

        let mut group = ResettingArrayBinding::<u32>::new("viewports", 2);
        group.set(&[4]).unwrap();
        assert_eq!(group.pending(), Some(&[4][..]));
        assert!(group.is_dirty());
        group.mark_clean();
        assert_eq!(group.pending(), None);
    }

    #[test]
    fn resetting_replaces_the_whole_group() {
        let mut binding = ResettingArrayBinding::<u32>::new("viewports", 4);
        assert_eq!(binding.consume(), Some(&[][..]));
        binding.set(&[1, 2, 3]).unwrap();
        binding.set(&[7]).unwrap();
        assert_eq!(binding.consume(), Some(&[7][..]));
        assert_eq!(binding.consume(), None);
        assert!(binding.set(&[0; 5]).is_err());
    }
}
