use serde::{Deserialize, Serialize};

/// Number of slots a heap starts with when no capacity is given. One slot is
/// reserved for the root sentinel, leaving room for 49 elements before the first growth.
pub const DEFAULT_INITIAL_CAPACITY: usize = 50;

/// Extra slots the sort utilities reserve on top of the input length so that
/// no growth happens while sorting
pub const DEFAULT_SORT_SLACK: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeapConfig {
    pub initial_capacity: usize,
    pub sort_slack: usize,
}

impl HeapConfig {
    pub fn new(initial_capacity: usize, sort_slack: usize) -> Self {
        Self { initial_capacity, sort_slack }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_sort_slack(mut self, sort_slack: usize) -> Self {
        self.sort_slack = sort_slack;
        self
    }

    /// Slots needed to heap-sort `len` values without growing
    pub(crate) fn sort_capacity(&self, len: usize) -> usize {
        len.saturating_add(self.sort_slack)
    }
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_CAPACITY, sort_slack: DEFAULT_SORT_SLACK }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HeapConfig::default();
        assert_eq!(config.initial_capacity, 50);
        assert_eq!(config.sort_slack, 2);
        assert_eq!(config.sort_capacity(10), 12);
        assert_eq!(config.sort_capacity(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_builder() {
        let config = HeapConfig::default().with_initial_capacity(8).with_sort_slack(16);
        assert_eq!(config, HeapConfig::new(8, 16));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: HeapConfig = serde_json::from_str(r#"{ "initialCapacity": 1 }"#).unwrap();
        assert_eq!(config, HeapConfig::new(1, DEFAULT_SORT_SLACK));

        let config: HeapConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HeapConfig::default());

        let json = serde_json::to_string(&HeapConfig::new(4, 0)).unwrap();
        assert_eq!(json, r#"{"initialCapacity":4,"sortSlack":0}"#);
    }
}
