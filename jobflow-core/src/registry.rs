use std::collections::HashMap;

/// Ordered set of node labels.
///
/// Each label gets the next free index the first time it is seen and keeps it
/// for the lifetime of the registry. Labels are never removed.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    labels: Vec<String>,
    indices: HashMap<String, usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index for `label`, registering it on first occurrence
    pub fn index_of(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.indices.get(label) {
            return idx;
        }

        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.indices.insert(label.to_string(), idx);
        idx
    }

    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }
}
