//! Key-value persistence.
//!
//! Every page reads its lists from a [`KeyValueStore`] when it opens and
//! writes the whole list back after each mutation. Values are JSON text,
//! except the two preference flags which are stored raw.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::Result;

/// Fixed keys under which each list or flag is stored
pub mod keys {
    pub const TRANSACTIONS: &str = "pb_tx";
    pub const BUDGETS: &str = "pb_budgets";
    pub const GOALS: &str = "pb_goals";
    pub const DARK: &str = "pb_dark";
    pub const PREMIUM: &str = "pb_premium";
    /// Single-slot buffer of the last bulk delete
    pub const UNDO: &str = "pb_undo";
}

/// String-valued storage, one value per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Typed JSON access layered over any [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Parsed value under `key`, or `default` when the key is absent or its value is corrupt.
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "stored value is not valid, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "store read failed, using default");
                default
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

/// In-process store, mainly for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let p = self.path_for(key);
        if !p.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&p)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let p = self.path_for(key);
        // write-then-rename so a crash never leaves a half-written list
        let tmp = p.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &p)?;
        debug!(key, path = %p.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let p = self.path_for(key);
        if p.exists() {
            fs::remove_file(&p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{Category, Transaction, TxType};
    use chrono::NaiveDate;

    fn sample() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2026, 2, 18).unwrap();
        vec![
            Transaction::new("t1", date, "Coles", 56.2, Category::Groceries, TxType::Expense),
            Transaction::new("t2", date, "Employer Pty", 1200.0, Category::Salary, TxType::Income),
        ]
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        store.save(keys::TRANSACTIONS, &sample()).unwrap();
        let back: Vec<Transaction> = store.load(keys::TRANSACTIONS, Vec::new());
        assert_eq!(back, sample());
    }

    #[test]
    fn test_missing_key_returns_default() {
        let store = MemoryStore::new();
        let v: Vec<Transaction> = store.load(keys::TRANSACTIONS, Vec::new());
        assert!(v.is_empty());
        assert!(!store.contains(keys::TRANSACTIONS));
    }

    #[test]
    fn test_corrupt_value_returns_default() {
        let mut store = MemoryStore::new();
        store.set(keys::GOALS, "{not json").unwrap();
        let v: Vec<crate::finance::Goal> = store.load(keys::GOALS, Vec::new());
        assert!(v.is_empty());
    }

    #[test]
    fn test_file_store_round_trip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data"));

        store.save(keys::TRANSACTIONS, &sample()).unwrap();
        assert!(store.path_for(keys::TRANSACTIONS).exists());

        // a fresh handle on the same directory sees the write
        let reopened = JsonFileStore::new(dir.path().join("data"));
        let back: Vec<Transaction> = reopened.load(keys::TRANSACTIONS, Vec::new());
        assert_eq!(back, sample());

        store.remove(keys::TRANSACTIONS).unwrap();
        assert!(!store.contains(keys::TRANSACTIONS));
        // removing twice is fine
        store.remove(keys::TRANSACTIONS).unwrap();
    }
}
