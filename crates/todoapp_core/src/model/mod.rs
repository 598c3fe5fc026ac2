//! Todo/list domain model.
//!
//! # Responsibility
//! - Define the records persisted in the `todos` and `lists` tables.
//! - Define validated write models used by services and repositories.
//!
//! # Invariants
//! - Every record is identified by a stable, store-assigned UUID.
//! - A todo references exactly one list id; the reference is not enforced.

pub mod list;
pub mod todo;
pub mod validation;
