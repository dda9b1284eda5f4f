//! Heap-sort entry points. Both build a transient [`Heap`] sized to hold the whole input
//! and then write the extracted minimums back in place.

use crate::{config::HeapConfig, heap::Heap, priority::Priority};
use log::debug;

/// Sorts `values` in ascending order
pub fn sort_integers(values: &mut [i64]) {
    sort_integers_with(values, &HeapConfig::default())
}

pub fn sort_integers_with(values: &mut [i64], config: &HeapConfig) {
    debug!("heap-sorting {} integers", values.len());
    let mut heap = Heap::with_capacity(config.sort_capacity(values.len()));
    heap.add_all(values.iter().copied());
    for (slot, min) in values.iter_mut().zip(heap.into_sorted_iter()) {
        *slot = min.priority();
    }
}

/// Sorts `values` by ascending priority. Values of equal priority may be reordered.
pub fn sort_values<T: Priority>(values: &mut Vec<T>) {
    sort_values_with(values, &HeapConfig::default())
}

pub fn sort_values_with<T: Priority>(values: &mut Vec<T>, config: &HeapConfig) {
    debug!("heap-sorting {} values", values.len());
    let mut heap = Heap::with_capacity(config.sort_capacity(values.len()));
    heap.add_all(values.drain(..));
    values.extend(heap.into_sorted_iter());
}
