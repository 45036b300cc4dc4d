//! Cache Entry Module
//!
//! A stored response together with its position in the insertion sequence.

// == Cache Entry ==
/// A single cached response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The cached response body
    pub value: String,
    /// Monotonic sequence number assigned when the key was first inserted
    pub insertion_order: u64,
}

impl CacheEntry {
    /// Creates a new entry at the given insertion position.
    pub fn new(value: String, insertion_order: u64) -> Self {
        Self {
            value,
            insertion_order,
        }
    }

    // == Replace Value ==
    /// Swaps in a new value, keeping the original insertion position.
    ///
    /// Returns the previous value.
    pub fn replace_value(&mut self, value: String) -> String {
        std::mem::replace(&mut self.value, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("answer".to_string(), 7);

        assert_eq!(entry.value, "answer");
        assert_eq!(entry.insertion_order, 7);
    }

    #[test]
    fn test_replace_value_keeps_order() {
        let mut entry = CacheEntry::new("first".to_string(), 3);

        let previous = entry.replace_value("second".to_string());

        assert_eq!(previous, "first");
        assert_eq!(entry.value, "second");
        assert_eq!(entry.insertion_order, 3);
    }
}
