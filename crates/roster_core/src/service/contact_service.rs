//! Contact session service.
//!
//! # Responsibility
//! - Load the stored snapshot into a record store at startup.
//! - Parse and execute one input line at a time.
//! - Persist the whole list after every mutating command.
//!
//! # Invariants
//! - Rejected commands never trigger a snapshot write.
//! - A failed write keeps the in-memory change and reports `Storage`.

use crate::command::{Command, CommandError, CommandOutcome, Disambiguator};
use crate::model::category::CategoryRule;
use crate::parser::{CommandParser, ParseError};
use crate::repo::person_repo::{PersonRepository, RepoResult};
use crate::store::RecordStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure of one input line, either at parse time or at execution time.
#[derive(Debug)]
pub enum ServiceError {
    Parse(ParseError),
    Command(CommandError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
        }
    }
}

impl From<ParseError> for ServiceError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for ServiceError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

/// Use-case service owning the live record store.
pub struct ContactService<R: PersonRepository> {
    repo: R,
    parser: CommandParser,
    store: RecordStore,
}

impl<R: PersonRepository> ContactService<R> {
    /// Loads the stored snapshot and starts a session on it.
    ///
    /// # Errors
    /// - Any `RepoError` from loading, including invalid stored records.
    pub fn open(repo: R, rule: CategoryRule) -> RepoResult<Self> {
        let persons = repo.load_snapshot(&rule)?;
        info!(
            "event=session_open module=service status=ok rule={} count={}",
            rule.name(),
            persons.len()
        );
        Ok(Self {
            repo,
            parser: CommandParser::new(rule),
            store: RecordStore::from_persons(persons),
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn rule(&self) -> &CategoryRule {
        self.parser.rule()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Parses and runs one input line.
    pub fn execute_line(
        &mut self,
        line: &str,
        disambiguator: &mut dyn Disambiguator,
    ) -> Result<CommandOutcome, ServiceError> {
        let command = self.parser.parse(line)?;
        Ok(self.execute(command, disambiguator)?)
    }

    /// Runs a typed command and persists the list when it changed.
    pub fn execute(
        &mut self,
        command: Command,
        disambiguator: &mut dyn Disambiguator,
    ) -> Result<CommandOutcome, CommandError> {
        let mutates = command.mutates();
        let rule = *self.parser.rule();
        let outcome = command.execute(&mut self.store, &rule, disambiguator)?;
        if mutates {
            self.repo.save_snapshot(self.store.persons())?;
        }
        Ok(outcome)
    }
}
