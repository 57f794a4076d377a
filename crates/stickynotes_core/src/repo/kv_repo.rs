//! Key-value store contract and in-memory implementation.
//!
//! # Responsibility
//! - Abstract `localStorage`-like persistence behind `KeyValueStore`.
//! - Define the storage-layer error type shared by all implementations.

#[cfg(not(target_arch = "wasm32"))]
use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum RepoError {
    /// Host storage rejected the operation (quota, privacy mode, ...).
    Storage(String),
    /// The board blob could not be serialized.
    Encode(serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    Db(DbError),
    #[cfg(not(target_arch = "wasm32"))]
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(message) => write!(f, "storage error: {message}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            #[cfg(not(target_arch = "wasm32"))]
            Self::Db(err) => write!(f, "{err}"),
            #[cfg(not(target_arch = "wasm32"))]
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(_) => None,
            Self::Encode(err) => Some(err),
            #[cfg(not(target_arch = "wasm32"))]
            Self::Db(err) => Some(err),
            #[cfg(not(target_arch = "wasm32"))]
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value persistence, modelled on web `Storage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_item(&mut self, key: &str) -> RepoResult<()>;
}

/// Process-local store; contents are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one entry, e.g. a blob left by a previous session.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> RepoResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> RepoResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn memory_store_overwrites_and_removes() {
        let mut store = MemoryKeyValueStore::new().with_item("k", "v1");
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v1"));

        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
        assert!(store.is_empty());
    }
}
