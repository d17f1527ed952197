//! Key-value persistence adapter for quiz progress.
//!
//! Mirrors the browser localStorage contract: string keys under a fixed
//! namespace prefix, JSON string values, and failure reported as a boolean
//! rather than an error. Inside the WASM module the backing store is an
//! in-memory map; the JS shell mirrors the namespaced blob into real
//! localStorage through the persist/restore routes.
//!
//! Every failure mode here is recoverable. A store that refuses writes, or a
//! value that no longer deserializes, degrades to "no saved progress" and the
//! quiz keeps working.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Minimal localStorage-shaped backend: string keys, string values, no
/// panics. Implementations report failure through return values only.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns false when the backend rejects the write (quota, disabled
    /// storage). The caller proceeds without saved progress.
    fn set(&mut self, key: &str, value: &str) -> bool;
    fn remove(&mut self, key: &str) -> bool;
    fn keys(&self) -> Vec<String>;
}

/// Default in-memory backend for the WASM session (and for tests).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key);
        true
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Namespaced serializing facade over a [`KeyValueStore`].
pub struct StorageManager {
    store: Box<dyn KeyValueStore>,
    prefix: String,
}

impl StorageManager {
    pub fn new(store: Box<dyn KeyValueStore>, prefix: &str) -> Self {
        Self {
            store,
            prefix: prefix.to_string(),
        }
    }

    /// Manager over a fresh [`MemoryStore`] with the quiz namespace.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()), "alienQuiz")
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key)
    }

    /// Serialize and store a value. False when serialization or the backend
    /// write fails; the quiz continues without saved progress either way.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.store.set(&self.namespaced(key), &json),
            Err(e) => {
                log::warn!("could not serialize '{key}': {e}");
                false
            }
        }
    }

    /// Load and deserialize a value. A missing key and a corrupt value are
    /// the same outcome: no usable data.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(&self.namespaced(key))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("discarding corrupt stored value for '{key}': {e}");
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.store.remove(&self.namespaced(key))
    }

    /// Remove every entry under this manager's namespace.
    pub fn clear(&mut self) -> bool {
        let prefix = format!("{}_", self.prefix);
        let mut ok = true;
        for key in self.store.keys() {
            if key.starts_with(&prefix) {
                ok &= self.store.remove(&key);
            }
        }
        ok
    }

    /// Raw JSON blob for a key, for the localStorage bridge.
    pub fn export_raw(&self, key: &str) -> Option<String> {
        self.store.get(&self.namespaced(key))
    }

    /// Inject a raw JSON blob under a key, for the localStorage bridge.
    /// The blob must at least parse as JSON; anything else is refused.
    pub fn import_raw(&mut self, key: &str, raw: &str) -> bool {
        if serde_json::from_str::<serde_json::Value>(raw).is_err() {
            log::warn!("refusing to import non-JSON blob for '{key}'");
            return false;
        }
        self.store.set(&self.namespaced(key), raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        count: u32,
        label: String,
    }

    /// Backend that rejects every write, as a storage-disabled browser does.
    struct RejectingStore;

    impl KeyValueStore for RejectingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> bool {
            false
        }
        fn remove(&mut self, _key: &str) -> bool {
            false
        }
        fn keys(&self) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut storage = StorageManager::in_memory();
        let sample = Sample {
            count: 7,
            label: "seven".to_string(),
        };
        assert!(storage.save("progress", &sample));
        assert_eq!(storage.load::<Sample>("progress"), Some(sample));
    }

    #[test]
    fn load_missing_key_is_none() {
        let storage = StorageManager::in_memory();
        assert_eq!(storage.load::<Sample>("progress"), None);
    }

    #[test]
    fn corrupt_value_reads_as_absent() {
        let mut storage = StorageManager::in_memory();
        assert!(storage.import_raw("progress", r#"{"count": "not a number"}"#));
        assert_eq!(storage.load::<Sample>("progress"), None);
    }

    #[test]
    fn remove_deletes_only_that_key() {
        let mut storage = StorageManager::in_memory();
        storage.save("progress", &1u32);
        storage.save("settings", &2u32);
        assert!(storage.remove("progress"));
        assert_eq!(storage.load::<u32>("progress"), None);
        assert_eq!(storage.load::<u32>("settings"), Some(2));
    }

    #[test]
    fn clear_removes_every_namespaced_key() {
        let mut storage = StorageManager::in_memory();
        storage.save("progress", &1u32);
        storage.save("settings", &2u32);
        assert!(storage.clear());
        assert_eq!(storage.load::<u32>("progress"), None);
        assert_eq!(storage.load::<u32>("settings"), None);
    }

    #[test]
    fn memory_store_keys_reflect_contents() {
        let mut backend = MemoryStore::default();
        backend.set("alienQuiz_progress", "{}");
        backend.set("other_app", "keep me");
        let mut keys = backend.keys();
        keys.sort();
        assert_eq!(keys, vec!["alienQuiz_progress", "other_app"]);
        backend.remove("alienQuiz_progress");
        assert_eq!(backend.get("other_app").as_deref(), Some("keep me"));
        assert!(backend.get("alienQuiz_progress").is_none());
    }

    #[test]
    fn rejecting_backend_reports_false_without_panicking() {
        let mut storage = StorageManager::new(Box::new(RejectingStore), "alienQuiz");
        assert!(!storage.save("progress", &1u32));
        assert_eq!(storage.load::<u32>("progress"), None);
        assert!(!storage.remove("progress"));
    }

    #[test]
    fn import_raw_refuses_non_json() {
        let mut storage = StorageManager::in_memory();
        assert!(!storage.import_raw("progress", "not json {{{"));
        assert!(storage.export_raw("progress").is_none());
    }
}
