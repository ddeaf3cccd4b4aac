//! Fleet domain records.
//!
//! # Responsibility
//! - Define the records persisted under each storage key.
//! - Keep the JSON shape compatible with the browser-era storage format
//!   (camelCase fields, display-string enum values).
//!
//! # Invariants
//! - References between records (`shipId`, `componentId`, ...) are weak and
//!   never enforced.
//! - Validation is form-level only: required fields and simple formats.

pub mod component;
pub mod date;
pub mod job;
pub mod notification;
pub mod ship;
pub mod user;
pub mod validation;

use crate::storage::StorageKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub use validation::ValidationError;

/// A record stored inside one JSON array collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection key holding records of this type.
    const KEY: StorageKey;
    /// Prefix used for newly generated ids.
    const ID_PREFIX: &'static str;
    /// Human-readable record kind used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Generates a fresh id with the record-specific prefix, e.g. `s3f2a...`.
pub fn new_record_id(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

/// Case-, space-, dash- and underscore-insensitive form used by enum parsers.
pub(crate) fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
