/// Key-value persistence for user preferences that outlive a session.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>>;
}
