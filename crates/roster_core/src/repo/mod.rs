//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-list persistence contract used by the session service.
//! - Isolate SQLite query details and the storage shape from command logic.
//!
//! # Invariants
//! - Records read back from storage are re-validated before use.
//! - Repository APIs report missing fields and constraint violations
//!   separately from DB transport errors.

pub mod person_repo;
