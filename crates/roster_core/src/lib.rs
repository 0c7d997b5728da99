//! Core domain logic for the Roster contact book.
//! This crate is the single source of truth for contact invariants.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod parser;
pub mod repo;
pub mod service;
pub mod store;

pub use command::{
    CancelAll, Choice, Command, CommandError, CommandOutcome, CommandResult, Disambiguation,
    Disambiguator, Index, MatchTier, PersonRef, Resolution,
};
pub use config::{AppConfig, ConfigError};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{
    default_log_level, init_logging, init_optional_logging, logging_status, LoggingError,
};
pub use model::category::{Category, CategoryRule};
pub use model::fields::{Email, Name, Note, Phone, Tag, ValidationError};
pub use model::person::Person;
pub use parser::{usage_lines, CommandParser, ParseError};
pub use repo::person_repo::{
    PersonRepository, RepoError, RepoResult, SqlitePersonRepository, StoredPerson,
};
pub use service::contact_service::{ContactService, ServiceError};
pub use store::{PersonFilter, RecordStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
