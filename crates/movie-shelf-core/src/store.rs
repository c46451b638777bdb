use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable key-value storage, one JSON file per key under the store
/// directory. Read and write failures degrade to the caller-supplied
/// default instead of propagating; the warn log is the only surfacing.
#[derive(Debug, Clone)]
pub struct ValueStore {
    dir: PathBuf,
}

impl ValueStore {
    pub fn open(dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            warn!("Failed to create store directory {:?}: {}", dir, e);
        }
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read the value stored under `key`, or `default` when the key is
    /// absent or its content is malformed. A corrupted file is deleted so
    /// the next write starts clean.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.key_path(key);
        if !path.exists() {
            debug!("Store miss: {} (no file)", key);
            return default;
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => {
                    debug!("Store hit: {}", key);
                    value
                }
                Err(e) => {
                    warn!(
                        "Store corruption detected for {}: {}. Deleting file and falling back to default.",
                        key, e
                    );
                    if let Err(rm_err) = std::fs::remove_file(&path) {
                        warn!("Failed to delete corrupted store file: {}", rm_err);
                    }
                    default
                }
            },
            Err(e) => {
                warn!("Failed to read store file for {}: {}", key, e);
                default
            }
        }
    }

    /// Serialize and write `value` under `key`, overwriting any prior
    /// content. Synchronous, no batching.
    pub fn store<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.key_path(key);
        match serde_json::to_string_pretty(value) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!("Failed to write store file for {}: {}", key, e);
                } else {
                    debug!("Store saved: {}", key);
                }
            }
            Err(e) => {
                warn!("Failed to serialize store value for {}: {}", key, e);
            }
        }
    }
}

/// A value mirrored into the store under a fixed key. Restored from the
/// last stored content at construction; every mutation writes back
/// synchronously.
pub struct PersistentValue<T> {
    store: ValueStore,
    key: String,
    value: T,
}

impl<T: Serialize + DeserializeOwned> PersistentValue<T> {
    pub fn load(store: ValueStore, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = store.load(&key, default);
        Self { store, key, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Mutate in place and mirror the result to storage.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let out = mutate(&mut self.value);
        self.store.store(&self.key, &self.value);
        out
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.store.store(&self.key, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_fresh_key_returns_default() {
        let dir = TempDir::new().unwrap();
        let store = ValueStore::open(dir.path().to_path_buf());

        let value: Vec<String> = store.load("missing", vec!["fallback".to_string()]);
        assert_eq!(value, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ValueStore::open(dir.path().to_path_buf());

        store.store("numbers", &vec![1u32, 2, 3]);
        let value: Vec<u32> = store.load("numbers", vec![]);
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_content_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let store = ValueStore::open(dir.path().to_path_buf());

        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        let value: Vec<u32> = store.load("broken", vec![7]);
        assert_eq!(value, vec![7]);

        // The corrupted file is gone, so the next write starts clean.
        assert!(!dir.path().join("broken.json").exists());
    }

    #[test]
    fn test_persistent_value_mirrors_every_update() {
        let dir = TempDir::new().unwrap();
        let store = ValueStore::open(dir.path().to_path_buf());

        let mut value = PersistentValue::load(store.clone(), "counter", 0u32);
        value.update(|v| *v += 1);
        value.update(|v| *v += 1);
        assert_eq!(*value.get(), 2);

        // A second session restores the last stored state.
        let reloaded = PersistentValue::load(store, "counter", 0u32);
        assert_eq!(*reloaded.get(), 2);
    }

    #[test]
    fn test_persistent_value_set_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = ValueStore::open(dir.path().to_path_buf());

        let mut value = PersistentValue::load(store.clone(), "name", String::new());
        value.set("memento".to_string());

        let reloaded: String = store.load("name", String::new());
        assert_eq!(reloaded, "memento");
    }
}
