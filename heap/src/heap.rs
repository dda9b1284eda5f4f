//! Array-backed binary min-heap.
//!
//! Elements live in a `Vec` in heap order: the root (minimum priority) is at index 0 and
//! the node at index `i` has its children at `2i + 1` and `2i + 2`. The heap additionally
//! tracks a logical slot capacity which counts one extra slot for the root sentinel, so
//! a heap of capacity `n` holds `n - 1` elements before it doubles.

use crate::{
    config::{HeapConfig, DEFAULT_INITIAL_CAPACITY},
    errors::{HeapError, HeapResult},
    priority::Priority,
};
use log::trace;
use std::fmt::{self, Display};

/// Smallest slot count a heap grows to, i.e. the sentinel plus one element
const MIN_GROWN_CAPACITY: usize = 2;

#[derive(Clone, Debug)]
pub struct Heap<T> {
    /// Occupied positions in heap order. Its length is the element count.
    items: Vec<T>,

    /// Logical slot count, always greater than `items.len()`
    capacity: usize,
}

impl<T: Priority> Heap<T> {
    /// Creates an empty heap with [`DEFAULT_INITIAL_CAPACITY`] slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty heap with exactly `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity.saturating_sub(1)), capacity }
    }

    pub fn with_config(config: &HeapConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    /// Fallible counterpart of [`Heap::with_capacity`]
    pub fn try_with_capacity(capacity: usize) -> HeapResult<Self> {
        let mut items = Vec::new();
        items.try_reserve_exact(capacity.saturating_sub(1))?;
        Ok(Self { items, capacity })
    }

    /// Inserts `value`, doubling the capacity first if the heap is full
    pub fn add(&mut self, value: T) {
        if self.is_full() {
            let capacity = self.grown_capacity().unwrap_or(usize::MAX);
            self.items.reserve_exact(capacity - 1 - self.items.len());
            self.set_capacity(capacity);
        }
        self.push(value);
    }

    /// Inserts `value`, reporting a failed growth instead of aborting. The heap is left
    /// untouched on error.
    pub fn try_add(&mut self, value: T) -> HeapResult<()> {
        if self.is_full() {
            self.try_grow()?;
        }
        self.push(value);
        Ok(())
    }

    /// Inserts every value in iteration order, exactly as repeated [`Heap::add`] calls would
    pub fn add_all(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.add(value);
        }
    }

    /// Fallible counterpart of [`Heap::add_all`]. Values preceding a failed insertion remain in the heap.
    pub fn try_add_all(&mut self, values: impl IntoIterator<Item = T>) -> HeapResult<()> {
        for value in values {
            self.try_add(value)?;
        }
        Ok(())
    }

    /// Removes and returns the element with the lowest priority, or `None` if the heap is empty
    pub fn remove_min(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let min = self.items.swap_remove(0);
        self.sift_down(0);
        Some(min)
    }

    /// Returns the element with the lowest priority without removing it
    pub fn peek_min(&self) -> Option<&T> {
        self.items.first()
    }

    /// Consumes the heap, yielding its elements by ascending priority
    pub fn into_sorted_iter(self) -> HeapIntoSortedIter<T> {
        HeapIntoSortedIter { heap: self }
    }

    fn push(&mut self, value: T) {
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.items[pos].priority() >= self.items[parent].priority() {
                break;
            }
            self.items.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        while let Some(child) = self.min_child(pos) {
            if self.items[child].priority() >= self.items[pos].priority() {
                break;
            }
            self.items.swap(pos, child);
            pos = child;
        }
    }

    /// Index of the child of `pos` with the lowest priority (the left one on ties), or
    /// `None` for a leaf
    fn min_child(&self, pos: usize) -> Option<usize> {
        let left = 2 * pos + 1;
        let right = left + 1;
        match (self.items.get(left), self.items.get(right)) {
            (Some(l), Some(r)) if r.priority() < l.priority() => Some(right),
            (Some(_), _) => Some(left),
            (None, _) => None,
        }
    }
}

impl<T> Heap<T> {
    /// Number of elements currently held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current slot count, including the root sentinel slot
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every element. The capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Elements in internal heap order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn is_full(&self) -> bool {
        self.items.len() + 1 >= self.capacity
    }

    /// Doubles the capacity, leaving the heap untouched if that is impossible
    fn try_grow(&mut self) -> HeapResult<()> {
        let capacity = self.grown_capacity().ok_or(HeapError::CapacityOverflow { capacity: self.capacity })?;
        self.items.try_reserve_exact(capacity - 1 - self.items.len())?;
        self.set_capacity(capacity);
        Ok(())
    }

    fn grown_capacity(&self) -> Option<usize> {
        self.capacity.checked_mul(2).map(|capacity| capacity.max(MIN_GROWN_CAPACITY))
    }

    fn set_capacity(&mut self, capacity: usize) {
        trace!("heap with {} elements grows from {} to {} slots", self.items.len(), self.capacity, capacity);
        self.capacity = capacity;
    }
}

impl<T: Priority> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Priority> Extend<T> for Heap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: Priority> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.add_all(iter);
        heap
    }
}

/// Renders the priorities in internal heap order, e.g. `[ 1 4 2 ]`
impl<T: Priority> Display for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for item in self.items.iter() {
            write!(f, " {}", item.priority())?;
        }
        write!(f, " ]")
    }
}

pub struct HeapIntoSortedIter<T> {
    heap: Heap<T>,
}

impl<T: Priority> Iterator for HeapIntoSortedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.remove_min()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Priority> ExactSizeIterator for HeapIntoSortedIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Prioritized;

    fn is_valid_heap<T: Priority>(heap: &Heap<T>) -> bool {
        let items = heap.as_slice();
        (1..items.len()).all(|pos| items[pos].priority() >= items[(pos - 1) / 2].priority())
    }

    fn drain<T: Priority>(heap: &mut Heap<T>) -> Vec<i64> {
        std::iter::from_fn(|| heap.remove_min()).map(|v| v.priority()).collect()
    }

    #[test]
    fn test_new_heap_is_empty() {
        let heap: Heap<i64> = Heap::new();
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), DEFAULT_INITIAL_CAPACITY);
        assert!(heap.peek_min().is_none());
        assert_eq!(Heap::<i64>::default().capacity(), DEFAULT_INITIAL_CAPACITY);
    }

    #[test]
    fn test_remove_min_on_empty_heap() {
        let mut heap: Heap<i64> = Heap::with_capacity(4);
        assert!(heap.remove_min().is_none());
        assert_eq!(heap.len(), 0);
        assert!(heap.is_empty());

        heap.add(1);
        assert_eq!(heap.remove_min(), Some(1));
        assert!(heap.remove_min().is_none());
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_add_maintains_heap_property() {
        let mut heap = Heap::new();
        for v in [5, 3, 8, 1, 9, 2, 7, 4, 6] {
            heap.add(v);
            assert!(is_valid_heap(&heap));
        }
        assert_eq!(heap.peek_min(), Some(&1));
        assert_eq!(heap.len(), 9);
    }

    #[test]
    fn test_remove_min_restores_heap_property() {
        let mut heap = Heap::new();
        heap.add_all([30, 10, 20, 5, 25, 15, 35]);
        while heap.remove_min().is_some() {
            assert!(is_valid_heap(&heap));
        }
    }

    #[test]
    fn test_extraction_yields_sorted_order() {
        let mut heap = Heap::new();
        heap.add_all([5, 3, 8, 1, 1, 9, -4, 0]);
        assert_eq!(drain(&mut heap), vec![-4, 0, 1, 1, 3, 5, 8, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_count_after_adds_and_removes() {
        let mut heap = Heap::with_capacity(3);
        for v in 0..10 {
            heap.add(v);
        }
        for removed in 1..=4 {
            assert!(heap.remove_min().is_some());
            assert_eq!(heap.len(), 10 - removed);
        }
        assert!(!heap.is_empty());
    }

    #[test]
    fn test_capacity_doubles_and_never_shrinks() {
        let mut heap = Heap::with_capacity(1);
        let mut capacities = vec![heap.capacity()];
        for v in (0..16).rev() {
            heap.add(v);
            assert!(heap.capacity() > heap.len());
            if capacities.last() != Some(&heap.capacity()) {
                capacities.push(heap.capacity());
            }
        }
        assert_eq!(capacities, vec![1, 2, 4, 8, 16, 32]);

        drain(&mut heap);
        assert_eq!(heap.capacity(), 32);
        heap.clear();
        assert_eq!(heap.capacity(), 32);
    }

    #[test]
    fn test_default_capacity_holds_49_elements() {
        let mut heap = Heap::new();
        heap.add_all(0..49);
        assert_eq!(heap.capacity(), 50);
        heap.add(49);
        assert_eq!(heap.capacity(), 100);
    }

    #[test]
    fn test_zero_capacity_still_grows() {
        let mut heap = Heap::with_capacity(0);
        heap.add(3);
        heap.add(1);
        assert_eq!(heap.capacity(), 4);
        assert_eq!(drain(&mut heap), vec![1, 3]);
    }

    #[test]
    fn test_failed_growth_leaves_heap_untouched() {
        let capacity = usize::MAX / 2 + 1;
        let mut heap = Heap { items: vec![3i64, 8], capacity };

        assert_eq!(heap.try_grow(), Err(HeapError::CapacityOverflow { capacity }));
        assert_eq!(heap.capacity(), capacity);
        assert_eq!(heap.as_slice(), &[3, 8]);

        // Far from full, so no growth is attempted
        heap.try_add(1).unwrap();
        assert_eq!(heap.capacity(), capacity);
        assert_eq!(heap.peek_min(), Some(&1));
    }

    #[test]
    fn test_try_grow_doubles_capacity() {
        let mut heap = Heap { items: vec![5i64], capacity: 2 };
        heap.try_grow().unwrap();
        assert_eq!(heap.capacity(), 4);
        heap.try_add(2).unwrap();
        heap.try_add(7).unwrap();
        assert_eq!(heap.capacity(), 4);
        heap.try_add(1).unwrap();
        assert_eq!(heap.capacity(), 8);
        assert_eq!(heap.to_string(), "[ 1 2 7 5 ]");
    }

    #[test]
    fn test_try_with_capacity_reports_allocation_failure() {
        let result = Heap::<i64>::try_with_capacity(usize::MAX);
        assert!(matches!(result, Err(HeapError::AllocationFailed(_))));
    }

    #[test]
    fn test_try_add_all_and_try_with_capacity() {
        let mut heap = Heap::try_with_capacity(1).unwrap();
        heap.try_add_all([4, 2, 9, 1]).unwrap();
        assert_eq!(heap.len(), 4);
        assert_eq!(heap.capacity(), 8);
        assert_eq!(drain(&mut heap), vec![1, 2, 4, 9]);
    }

    #[test]
    fn test_render_lists_priorities_in_heap_order() {
        let mut heap = Heap::new();
        assert_eq!(heap.to_string(), "[ ]");
        heap.add_all([3, 1, 2]);
        assert_eq!(heap.to_string(), "[ 1 3 2 ]");
        heap.add(0);
        assert_eq!(heap.to_string(), "[ 0 1 2 3 ]");
    }

    #[test]
    fn test_duplicates_and_negative_priorities() {
        let mut heap = Heap::new();
        heap.add_all([5, 5, -3, -3, 7, i64::MIN, i64::MAX]);
        assert!(is_valid_heap(&heap));
        assert_eq!(drain(&mut heap), vec![i64::MIN, -3, -3, 5, 5, 7, i64::MAX]);
    }

    #[test]
    fn test_payloads_travel_with_their_priority() {
        let mut heap = Heap::with_capacity(2);
        heap.add(Prioritized::new(20, "flush"));
        heap.add(Prioritized::new(10, "write"));
        heap.add(Prioritized::new(30, "close"));
        let order = heap.into_sorted_iter().map(Prioritized::into_value).collect::<Vec<_>>();
        assert_eq!(order, vec!["write", "flush", "close"]);
    }

    #[test]
    fn test_sorted_iter_is_exact_size() {
        let heap: Heap<i32> = [4, 8, 2].into_iter().collect();
        let iter = heap.into_sorted_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 4, 8]);
    }

    #[test]
    fn test_extend_matches_add_all() {
        let values = [9, 4, 7, 1, 8];
        let mut extended = Heap::with_capacity(2);
        extended.extend(values);
        let mut added = Heap::with_capacity(2);
        added.add_all(values);
        assert_eq!(extended.as_slice(), added.as_slice());
        assert_eq!(extended.capacity(), added.capacity());
    }

    #[test]
    fn test_many_add_remove_cycles() {
        let mut heap = Heap::with_capacity(2);
        for _ in 0..100 {
            heap.add(10);
            heap.add(5);
            heap.add(15);
            assert_eq!(heap.remove_min(), Some(5));
            assert_eq!(heap.remove_min(), Some(10));
            heap.add(1);
            assert_eq!(heap.remove_min(), Some(1));
            assert_eq!(heap.remove_min(), Some(15));
        }
        assert!(heap.is_empty());
        assert_eq!(heap.capacity(), 4);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut heap = Heap::new();
        heap.add_all([10, 5]);
        let snapshot = heap.clone();
        heap.remove_min();
        assert_eq!(heap.len(), 1);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.peek_min(), Some(&5));
    }
}
