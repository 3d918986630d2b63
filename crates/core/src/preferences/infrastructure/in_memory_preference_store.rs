use std::collections::HashMap;

use crate::preferences::domain::preference_store::PreferenceStore;

/// Non-persistent store for tests and one-shot runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
