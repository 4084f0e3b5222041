use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque string-keyed store holding the per-day records.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MemoryStore {
    pub entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
