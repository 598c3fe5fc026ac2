//! Data access use-case services.
//!
//! # Responsibility
//! - Translate todo/list intents into repository calls.
//! - Validate required fields before any store call.
//! - Signal view invalidation after every successful mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

pub mod invalidation;
pub mod list_service;
pub mod todo_service;
