//! Person aggregate.
//!
//! # Responsibility
//! - Aggregate validated field values into one immutable contact record.
//! - Define structural equality and same-person identity.
//!
//! # Invariants
//! - Fields are never mutated in place; edits build a replacement `Person`.
//! - Same-person identity is normalized name + normalized phone, nothing else.

use crate::model::category::Category;
use crate::model::fields::{Email, Name, Note, Phone, Tag};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One contact record.
///
/// `PartialEq` is full structural equality over all six fields, with tags
/// compared as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    category: Category,
    note: Note,
    tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        category: Category,
        note: Note,
        tags: impl IntoIterator<Item = Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            category,
            note,
            tags: tags.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns whether `other` denotes the same person for duplicate checks.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name && self.phone == other.phone
    }

    /// Builds a replacement record that differs only in its note.
    pub fn with_note(&self, note: Note) -> Self {
        Self {
            note,
            ..self.clone()
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Category: {}; Tags: ",
            self.name, self.phone, self.email, self.category
        )?;
        for tag in &self.tags {
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
