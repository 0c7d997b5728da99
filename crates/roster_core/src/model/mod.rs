//! Contact domain model.
//!
//! # Responsibility
//! - Define validated field values and the `Person` aggregate.
//! - Keep category validation a swappable policy (`CategoryRule`).
//!
//! # Invariants
//! - Every `Person` is built only from already-validated field values.
//! - Duplicate detection uses `Person::is_same_person`, not `==`.

pub mod category;
pub mod fields;
pub mod person;
