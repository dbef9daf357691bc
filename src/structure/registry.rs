// Tue Jan 20 2026 - Alex

use indexmap::IndexSet;

/// Names of records accepted for dumping during this run, in acceptance order.
///
/// Append-only. A name is present from the moment its record is accepted, before any
/// of its fields are written.
#[derive(Debug, Default)]
pub struct DumpRegistry {
    names: IndexSet<String>,
}

impl DumpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns `false` when the name was already registered.
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_once() {
        let mut registry = DumpRegistry::new();
        assert!(registry.insert("task_struct"));
        assert!(!registry.insert("task_struct"));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("task_struct"));
        assert!(!registry.contains("Task_struct"));
    }

    #[test]
    fn test_acceptance_order() {
        let mut registry = DumpRegistry::new();
        registry.insert("b");
        registry.insert("a");
        registry.insert("b");
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
