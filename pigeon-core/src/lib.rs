//! pigeon-core: domain types, merchant classifier and key-value persistence for Pigeon Budget

pub mod error;
pub mod finance;
pub mod prefs;
pub mod rules;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use finance::{Budget, Category, Goal, Transaction, TxType};
pub use rules::{Classification, classify};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreExt, keys};
