//! In-memory record store.
//!
//! # Responsibility
//! - Own the ordered person list and the active listing filter.
//! - Derive the filtered view on demand from the full list.
//! - Hold the single "selected person" slot consulted by viewers.
//!
//! # Invariants
//! - The store never re-checks same-person uniqueness; callers do.
//! - Reading the filtered view never mutates the underlying list.
//! - `remove`/`replace` target an exact structural match and fail loudly
//!   with `StoreError::NotFound` otherwise.
//! - `remove_at`/`replace_at` address one list slot, so a record borrowed
//!   from a view is never confused with an equal record elsewhere.

pub mod filter;

use crate::model::person::Person;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use filter::PersonFilter;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-internal consistency error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Target record is not present; indicates a stale reference.
    NotFound(String),
    /// List slot past the end of the person list.
    PositionOutOfRange(usize),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "person not found in store: {name}"),
            Self::PositionOutOfRange(position) => {
                write!(f, "store position {position} is out of range")
            }
        }
    }
}

impl Error for StoreError {}

/// Ordered person list plus derived view state.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    persons: Vec<Person>,
    filter: PersonFilter,
    selected: Option<Person>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a loaded snapshot, showing everyone.
    pub fn from_persons(persons: Vec<Person>) -> Self {
        Self {
            persons,
            ..Self::default()
        }
    }

    /// Full, unfiltered list in insertion order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Returns whether any stored record is the same person as `person`.
    pub fn contains_same_person(&self, person: &Person) -> bool {
        self.persons
            .iter()
            .any(|existing| existing.is_same_person(person))
    }

    /// Appends without a duplicate check.
    pub fn add(&mut self, person: Person) {
        self.persons.push(person);
    }

    pub fn remove(&mut self, target: &Person) -> StoreResult<Person> {
        let position = self.position_of(target)?;
        self.remove_at(position)
    }

    /// Substitutes `target` with `replacement` at the same position.
    pub fn replace(&mut self, target: &Person, replacement: Person) -> StoreResult<()> {
        let position = self.position_of(target)?;
        self.replace_at(position, replacement)
    }

    /// Full-list position of a record borrowed from this store.
    ///
    /// Matches on identity, not equality: of two equal records only the one
    /// `record` points at is found.
    pub fn position_of_record(&self, record: &Person) -> StoreResult<usize> {
        self.persons
            .iter()
            .position(|person| std::ptr::eq(person, record))
            .ok_or_else(|| self.not_found(record))
    }

    pub fn remove_at(&mut self, position: usize) -> StoreResult<Person> {
        if position >= self.persons.len() {
            return Err(self.out_of_range(position));
        }
        let removed = self.persons.remove(position);
        if self.selected.as_ref() == Some(&removed) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn replace_at(&mut self, position: usize, replacement: Person) -> StoreResult<()> {
        if position >= self.persons.len() {
            return Err(self.out_of_range(position));
        }
        if self.selected.as_ref() == Some(&self.persons[position]) {
            self.selected = Some(replacement.clone());
        }
        self.persons[position] = replacement;
        Ok(())
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: PersonFilter) {
        self.filter = filter;
    }

    /// Restores the full list as the filtered view.
    pub fn show_all(&mut self) {
        self.filter = PersonFilter::All;
    }

    /// Current filtered view, recomputed from the full list.
    pub fn filtered_view(&self) -> Vec<&Person> {
        self.view_where(|person| self.filter.matches(person))
    }

    /// Ad-hoc view over the full list; does not change the active filter.
    pub fn view_where(&self, predicate: impl Fn(&Person) -> bool) -> Vec<&Person> {
        self.persons
            .iter()
            .filter(|person| predicate(*person))
            .collect()
    }

    pub fn selected(&self) -> Option<&Person> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, person: Person) {
        self.selected = Some(person);
    }

    fn position_of(&self, target: &Person) -> StoreResult<usize> {
        self.persons
            .iter()
            .position(|person| person == target)
            .ok_or_else(|| self.not_found(target))
    }

    fn not_found(&self, target: &Person) -> StoreError {
        error!(
            "event=store_lookup module=store status=error error_code=not_found size={}",
            self.persons.len()
        );
        StoreError::NotFound(target.name().to_string())
    }

    fn out_of_range(&self, position: usize) -> StoreError {
        error!(
            "event=store_lookup module=store status=error error_code=out_of_range position={} size={}",
            position,
            self.persons.len()
        );
        StoreError::PositionOutOfRange(position)
    }
}
