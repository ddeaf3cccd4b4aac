//! Repository layer over JSON record collections.
//!
//! # Responsibility
//! - Provide CRUD over one storage key per record type.
//! - Isolate key-value/JSON details from services.
//!
//! # Invariants
//! - Writes call `Record::validate()` before touching storage.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`) in
//!   addition to storage errors.
//! - Collection order is insertion order.

pub mod record_repo;
