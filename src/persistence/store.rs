use super::files::atomic_write;
use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Fixed key holding the JSON-serialized task collection
pub const TASKS_KEY: &str = "tasks";

/// Opaque key-value string store backing the task collection.
///
/// A missing key is `None`; corruption is the caller's problem (the
/// repository degrades a bad blob to an empty collection).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per key in the data directory,
/// written atomically
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        atomic_write(self.path_for(key), value)
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(TASKS_KEY), None);

        store.set(TASKS_KEY, "[]").unwrap();
        assert_eq!(store.get(TASKS_KEY).as_deref(), Some("[]"));

        store.set(TASKS_KEY, "[1]").unwrap();
        assert_eq!(store.get(TASKS_KEY).as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.get(TASKS_KEY), None);

        store.set(TASKS_KEY, r#"[{"x":1}]"#).unwrap();
        assert_eq!(store.get(TASKS_KEY).as_deref(), Some(r#"[{"x":1}]"#));

        // A second store over the same directory sees the value
        let reopened = FileStore::new(temp_dir.path().to_path_buf());
        assert_eq!(reopened.get(TASKS_KEY).as_deref(), Some(r#"[{"x":1}]"#));
    }
}
