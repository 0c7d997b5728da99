//! Contact commands and their execution against the record store.
//!
//! # Responsibility
//! - Define the typed command set produced by the parser.
//! - Execute one command to completion, including any disambiguation.
//!
//! # Invariants
//! - Every command is all-or-nothing: user-input failures leave the store
//!   untouched.
//! - Duplicate checks scan the full store, never just the filtered view.
//! - Index-based commands address the current filtered view.

pub mod resolve;

use crate::model::category::CategoryRule;
use crate::model::fields::{Note, ValidationError};
use crate::model::person::Person;
use crate::repo::person_repo::RepoError;
use crate::store::{PersonFilter, RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use resolve::{
    match_reference, normalize_reference, resolve_index, resolve_reference, CancelAll, Choice,
    Disambiguation, Disambiguator, Index, MatchTier, PersonRef, Resolution,
};

pub const MESSAGE_INVALID_INDEX: &str = "The person index provided is invalid";
pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book";
pub const MESSAGE_CANCELLED: &str = "Deletion cancelled.";
pub const MESSAGE_LIST_ALL: &str = "Listed all persons";

pub type CommandResult<T> = Result<T, CommandError>;

/// Command-boundary error surfaced verbatim to the user.
#[derive(Debug)]
pub enum CommandError {
    /// Raw input failed a field constraint.
    Validation(ValidationError),
    /// Index outside the current filtered view.
    InvalidIndex,
    /// Name reference matched nobody.
    NoMatch(String),
    /// Insert would create a same-person duplicate.
    DuplicatePerson,
    /// User aborted disambiguation.
    Cancelled,
    /// Store lost track of a resolved record (programming error).
    Store(StoreError),
    /// Snapshot write failed after the in-memory change.
    Storage(RepoError),
}

impl CommandError {
    /// Returns whether this error reports bad user input rather than a defect.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Store(_) | Self::Storage(_))
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::InvalidIndex => "invalid_index",
            Self::NoMatch(_) => "no_match",
            Self::DuplicatePerson => "duplicate_person",
            Self::Cancelled => "cancelled",
            Self::Store(_) => "store_not_found",
            Self::Storage(_) => "storage",
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidIndex => f.write_str(MESSAGE_INVALID_INDEX),
            Self::NoMatch(reference) => write!(f, "No person matches the name: {reference}"),
            Self::DuplicatePerson => f.write_str(MESSAGE_DUPLICATE_PERSON),
            Self::Cancelled => f.write_str(MESSAGE_CANCELLED),
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "could not save contacts: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for CommandError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Success payload of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Human-readable feedback line.
    pub feedback: String,
    /// Person the viewer should focus, if any.
    pub selected: Option<Person>,
}

impl CommandOutcome {
    fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            selected: None,
        }
    }
}

/// Typed command produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Person),
    Delete(PersonRef),
    Note { index: Index, note: Note },
    View(Index),
    Find(PersonFilter),
    List,
}

impl Command {
    /// Returns whether a successful run changes the person list.
    pub fn mutates(&self) -> bool {
        matches!(self, Self::Add(_) | Self::Delete(_) | Self::Note { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Note { .. } => "note",
            Self::View(_) => "view",
            Self::Find(_) => "find",
            Self::List => "list",
        }
    }

    /// Runs the command against `store`.
    ///
    /// `rule` supplies the category-specific add message; `disambiguator` is
    /// consulted only when a name reference is ambiguous.
    pub fn execute(
        self,
        store: &mut RecordStore,
        rule: &CategoryRule,
        disambiguator: &mut dyn Disambiguator,
    ) -> CommandResult<CommandOutcome> {
        let label = self.label();
        let result = match self {
            Self::Add(person) => add_person(store, rule, person),
            Self::Delete(reference) => delete_person(store, &reference, disambiguator),
            Self::Note { index, note } => edit_note(store, index, note),
            Self::View(index) => view_person(store, index),
            Self::Find(filter) => {
                store.set_filter(filter);
                let shown = store.filtered_view().len();
                Ok(CommandOutcome::message(format!("{shown} persons listed!")))
            }
            Self::List => {
                store.show_all();
                Ok(CommandOutcome::message(MESSAGE_LIST_ALL))
            }
        };

        match &result {
            Ok(_) => info!(
                "event=command_execute module=command status=ok command={label} size={}",
                store.len()
            ),
            Err(err) if err.is_user_error() => info!(
                "event=command_execute module=command status=rejected command={label} error_code={}",
                err.code()
            ),
            Err(err) => warn!(
                "event=command_execute module=command status=error command={label} error_code={}",
                err.code()
            ),
        }
        result
    }
}

fn add_person(
    store: &mut RecordStore,
    rule: &CategoryRule,
    person: Person,
) -> CommandResult<CommandOutcome> {
    if store.contains_same_person(&person) {
        return Err(CommandError::DuplicatePerson);
    }
    let feedback = rule.announce(person.category());
    store.add(person);
    Ok(CommandOutcome::message(feedback))
}

fn delete_person(
    store: &mut RecordStore,
    reference: &PersonRef,
    disambiguator: &mut dyn Disambiguator,
) -> CommandResult<CommandOutcome> {
    let position = {
        let view = store.filtered_view();
        let target = resolve_reference(&view, reference, disambiguator)?;
        store.position_of_record(target)?
    };
    let removed = store.remove_at(position)?;
    Ok(CommandOutcome::message(format!("Deleted Person: {removed}")))
}

fn edit_note(store: &mut RecordStore, index: Index, note: Note) -> CommandResult<CommandOutcome> {
    let (position, edited) = {
        let view = store.filtered_view();
        let target = resolve_index(&view, index)?;
        (store.position_of_record(target)?, target.with_note(note))
    };
    let feedback = if edited.note().is_empty() {
        format!("Removed note from Person: {edited}")
    } else {
        format!("Added note to Person: {edited}")
    };
    store.replace_at(position, edited)?;
    store.show_all();
    Ok(CommandOutcome::message(feedback))
}

fn view_person(store: &mut RecordStore, index: Index) -> CommandResult<CommandOutcome> {
    let target = {
        let view = store.filtered_view();
        resolve_index(&view, index)?.clone()
    };
    store.select(target.clone());
    Ok(CommandOutcome {
        feedback: format!("Viewing information of {target}"),
        selected: Some(target),
    })
}
