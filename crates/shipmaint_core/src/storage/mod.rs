//! Key-value storage contract and typed JSON collections.
//!
//! # Responsibility
//! - Mirror the browser storage model: string keys holding JSON text.
//! - Load/save whole record collections stored as one JSON array per key.
//!
//! # Invariants
//! - A missing collection loads as an empty `Vec` on every path.
//! - A malformed collection loads as empty for reads only; write paths use
//!   `load_collection_strict` and get `StorageError::Malformed`.
//! - Backend failures (SQLite errors) are never masked as empty data.

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::db::DbError;

mod kv_store;

pub use kv_store::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Well-known storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Ships,
    Components,
    Jobs,
    Users,
    Notifications,
    /// Logged-in user object (not an array).
    CurrentUser,
}

impl StorageKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ships => "ships",
            Self::Components => "components",
            Self::Jobs => "jobs",
            Self::Users => "users",
            Self::Notifications => "notifications",
            Self::CurrentUser => "currentUser",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize {
        key: StorageKey,
        source: serde_json::Error,
    },
    Malformed {
        key: StorageKey,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "failed to serialize `{key}`: {source}")
            }
            Self::Malformed { key, source } => {
                write!(f, "stored `{key}` cannot be parsed: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize { source, .. } | Self::Malformed { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value store with browser `localStorage` semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removing an absent key is a no-op.
    fn remove_item(&self, key: &str) -> StorageResult<()>;

    fn contains_key(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}

/// Loads one JSON array collection, defaulting to empty when missing or malformed.
pub fn load_collection<T, S>(store: &S, key: StorageKey) -> StorageResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_item(key.as_str())? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => Ok(items.unwrap_or_default()),
        Err(err) => {
            warn!(
                "event=collection_load module=storage status=fallback key={} error_code=malformed_json error={}",
                key, err
            );
            Ok(Vec::new())
        }
    }
}

/// Loads one collection for a read-modify-write cycle.
///
/// # Errors
/// - Returns `StorageError::Malformed` when the stored JSON does not parse as
///   `Vec<T>`, so the caller never overwrites data it could not read.
pub fn load_collection_strict<T, S>(store: &S, key: StorageKey) -> StorageResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_item(key.as_str())? else {
        return Ok(Vec::new());
    };

    serde_json::from_str::<Option<Vec<T>>>(&raw)
        .map(Option::unwrap_or_default)
        .map_err(|source| {
            warn!(
                "event=collection_load module=storage status=error key={} error_code=malformed_json",
                key
            );
            StorageError::Malformed { key, source }
        })
}

/// Replaces one collection with the given records.
pub fn save_collection<T, S>(store: &S, key: StorageKey, items: &[T]) -> StorageResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items)
        .map_err(|source| StorageError::Serialize { key, source })?;
    store.set_item(key.as_str(), &raw)
}

/// Loads a single JSON value; malformed data loads as `None`.
pub fn load_value<T, S>(store: &S, key: StorageKey) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get_item(key.as_str())? else {
        return Ok(None);
    };

    match serde_json::from_str::<Option<T>>(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            warn!(
                "event=value_load module=storage status=fallback key={} error_code=malformed_json error={}",
                key, err
            );
            Ok(None)
        }
    }
}

pub fn save_value<T, S>(store: &S, key: StorageKey, value: &T) -> StorageResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)
        .map_err(|source| StorageError::Serialize { key, source })?;
    store.set_item(key.as_str(), &raw)
}
