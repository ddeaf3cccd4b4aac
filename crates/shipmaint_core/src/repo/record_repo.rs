//! Generic record repository backed by a key-value store.

use crate::model::{new_record_id, Record, ValidationError};
use crate::storage::{
    load_collection, load_collection_strict, save_collection, KeyValueStore, StorageError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Storage(StorageError),
    NotFound { kind: &'static str, id: String },
    DuplicateId { kind: &'static str, id: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} already exists: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound { .. } | Self::DuplicateId { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// CRUD contract for one record collection.
pub trait RecordRepository<T: Record> {
    /// Appends a record, generating an id when blank. Returns the stored record.
    fn create(&self, record: &T) -> RepoResult<T>;
    /// Replaces the record with the same id.
    fn update(&self, record: &T) -> RepoResult<()>;
    fn get(&self, id: &str) -> RepoResult<Option<T>>;
    fn list(&self) -> RepoResult<Vec<T>>;
    /// Hard-deletes one record. Never cascades to other collections.
    fn delete(&self, id: &str) -> RepoResult<()>;
    /// Overwrites the whole collection without validation.
    fn replace_all(&self, records: &[T]) -> RepoResult<()>;
}

/// Record repository storing `T` as a JSON array under `T::KEY`.
pub struct KvRecordRepository<'s, T, S: ?Sized> {
    store: &'s S,
    _record: PhantomData<fn() -> T>,
}

impl<'s, T, S> KvRecordRepository<'s, T, S>
where
    T: Record,
    S: KeyValueStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Lists records matching `predicate`, in collection order.
    pub fn list_where(&self, predicate: impl Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|record| predicate(record))
            .collect())
    }

    /// Loads the collection for a write; malformed data is an error, never empty.
    pub fn load_for_write(&self) -> RepoResult<Vec<T>> {
        Ok(load_collection_strict(self.store, T::KEY)?)
    }

    fn not_found(id: &str) -> RepoError {
        RepoError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }
}

impl<T, S> RecordRepository<T> for KvRecordRepository<'_, T, S>
where
    T: Record,
    S: KeyValueStore + ?Sized,
{
    fn create(&self, record: &T) -> RepoResult<T> {
        record.validate()?;

        let mut records = self.load_for_write()?;
        let mut stored = record.clone();
        if stored.id().trim().is_empty() {
            stored.set_id(new_record_id(T::ID_PREFIX));
        } else if records.iter().any(|existing| existing.id() == stored.id()) {
            return Err(RepoError::DuplicateId {
                kind: T::KIND,
                id: stored.id().to_string(),
            });
        }

        records.push(stored.clone());
        save_collection(self.store, T::KEY, &records)?;
        info!(
            "event=record_create module=repo status=ok kind={} id={}",
            T::KIND,
            stored.id()
        );
        Ok(stored)
    }

    fn update(&self, record: &T) -> RepoResult<()> {
        record.validate()?;

        let mut records = self.load_for_write()?;
        let slot = records
            .iter_mut()
            .find(|existing| existing.id() == record.id())
            .ok_or_else(|| Self::not_found(record.id()))?;
        *slot = record.clone();

        save_collection(self.store, T::KEY, &records)?;
        info!(
            "event=record_update module=repo status=ok kind={} id={}",
            T::KIND,
            record.id()
        );
        Ok(())
    }

    fn get(&self, id: &str) -> RepoResult<Option<T>> {
        let records: Vec<T> = load_collection(self.store, T::KEY)?;
        Ok(records.into_iter().find(|record| record.id() == id))
    }

    fn list(&self) -> RepoResult<Vec<T>> {
        Ok(load_collection(self.store, T::KEY)?)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            return Err(Self::not_found(id));
        }

        save_collection(self.store, T::KEY, &records)?;
        info!(
            "event=record_delete module=repo status=ok kind={} id={}",
            T::KIND,
            id
        );
        Ok(())
    }

    fn replace_all(&self, records: &[T]) -> RepoResult<()> {
        save_collection(self.store, T::KEY, records)?;
        Ok(())
    }
}
