//! A binary min-heap over values exposing an integer priority, plus heap-sort utilities.
//!
//! ```
//! use binheap::{Heap, Priority};
//!
//! struct Job(i64);
//!
//! impl Priority for Job {
//!     fn priority(&self) -> i64 {
//!         self.0
//!     }
//! }
//!
//! let mut heap = Heap::new();
//! heap.add(Job(4));
//! heap.add(Job(1));
//! heap.add(Job(10));
//! assert_eq!(heap.remove_min().map(|job| job.0), Some(1));
//!
//! let mut values = [5, 3, 8, 1];
//! binheap::sort_integers(&mut values);
//! assert_eq!(values, [1, 3, 5, 8]);
//! ```

pub mod config;
pub mod errors;
pub mod heap;
pub mod priority;
pub mod sort;

pub use config::HeapConfig;
pub use errors::{HeapError, HeapResult};
pub use heap::{Heap, HeapIntoSortedIter};
pub use priority::{Prioritized, Priority};
pub use sort::{sort_integers, sort_integers_with, sort_values, sort_values_with};
