//! Person snapshot repository and storage conversion boundary.
//!
//! # Responsibility
//! - Convert between `Person` and the storage shape `StoredPerson`.
//! - Replace and load the whole ordered person list in SQLite.
//!
//! # Invariants
//! - A snapshot write replaces every row in one transaction.
//! - Loaded rows replay full field validation; nothing bypasses it.
//! - A missing field is reported before any value is validated.
//! - A loaded list never holds two records of the same person.

use crate::db::DbError;
use crate::model::category::{Category, CategoryRule};
use crate::model::fields::{Email, Name, Note, Phone, Tag, ValidationError};
use crate::model::person::Person;
use log::{error, info};
use rusqlite::{params, Connection, TransactionBehavior};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence and conversion.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Required field absent from a stored record (`Name`, `Phone`, ...).
    MissingField(&'static str),
    /// Stored value violates a field constraint.
    Validation(ValidationError),
    MissingRequiredTable(&'static str),
    /// Loaded list repeats a person; holds the zero-based later position.
    DuplicatePerson(usize),
    /// List position does not fit the integer storage key.
    PositionOverflow(usize),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingField(field) => write!(f, "Person's {field} field is missing!"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "database is missing required table `{table}`")
            }
            Self::DuplicatePerson(position) => write!(
                f,
                "Persons list contains duplicate person(s) at position {}",
                position + 1
            ),
            Self::PositionOverflow(position) => {
                write!(f, "person position {position} exceeds the storage key range")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::MissingField(_)
            | Self::MissingRequiredTable(_)
            | Self::DuplicatePerson(_)
            | Self::PositionOverflow(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Storage-facing person shape: raw strings, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPerson {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub category: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl StoredPerson {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: Some(person.name().as_str().to_string()),
            phone: Some(person.phone().as_str().to_string()),
            email: Some(person.email().as_str().to_string()),
            category: Some(person.category().as_str().to_string()),
            note: Some(person.note().as_str().to_string()),
            tags: person
                .tags()
                .iter()
                .map(|tag| tag.as_str().to_string())
                .collect(),
        }
    }

    /// Validates this record into a `Person`.
    ///
    /// # Errors
    /// - `MissingField` for the first absent field in order
    ///   name, phone, email, category, note.
    /// - `Validation` for the first field or tag violating its constraint.
    pub fn into_person(self, rule: &CategoryRule) -> RepoResult<Person> {
        let name = self.name.ok_or(RepoError::MissingField("Name"))?;
        let phone = self.phone.ok_or(RepoError::MissingField("Phone"))?;
        let email = self.email.ok_or(RepoError::MissingField("Email"))?;
        let category = self.category.ok_or(RepoError::MissingField("Category"))?;
        let note = self.note.ok_or(RepoError::MissingField("Note"))?;

        let tags = self
            .tags
            .iter()
            .map(|tag| Tag::new(tag))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Person::new(
            Name::new(&name)?,
            Phone::new(&phone)?,
            Email::new(&email)?,
            Category::new(&category, rule)?,
            Note::new(&note)?,
            tags,
        ))
    }
}

/// Repository interface for whole-list contact persistence.
pub trait PersonRepository {
    /// Replaces the stored list with `persons`, preserving order.
    fn save_snapshot(&mut self, persons: &[Person]) -> RepoResult<()>;
    /// Loads raw stored records in saved order.
    fn load_stored(&self) -> RepoResult<Vec<StoredPerson>>;

    /// Loads and validates the stored list.
    ///
    /// # Errors
    /// - Anything `StoredPerson::into_person` reports, for the first bad record.
    /// - `DuplicatePerson` when two records are the same person.
    fn load_snapshot(&self, rule: &CategoryRule) -> RepoResult<Vec<Person>> {
        let persons = self
            .load_stored()?
            .into_iter()
            .map(|stored| stored.into_person(rule))
            .collect::<RepoResult<Vec<_>>>()?;
        ensure_distinct_persons(&persons)?;
        Ok(persons)
    }
}

/// Rejects a list in which any two records are the same person.
fn ensure_distinct_persons(persons: &[Person]) -> RepoResult<()> {
    for (position, person) in persons.iter().enumerate() {
        if persons[..position]
            .iter()
            .any(|earlier| earlier.is_same_person(person))
        {
            error!(
                "event=snapshot_load module=repo status=error error_code=duplicate_person position={}",
                position
            );
            return Err(RepoError::DuplicatePerson(position));
        }
    }
    Ok(())
}

/// Converts a list position into the integer storage key.
pub(crate) fn position_key(position: usize) -> RepoResult<i64> {
    i64::try_from(position).map_err(|_| RepoError::PositionOverflow(position))
}

/// SQLite-backed snapshot repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        for table in ["persons", "person_tags"] {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }
        Ok(Self { conn })
    }

    /// Writes raw records as-is, without validation.
    pub fn save_stored(&mut self, records: &[StoredPerson]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM person_tags;", [])?;
        tx.execute("DELETE FROM persons;", [])?;

        for (position, record) in records.iter().enumerate() {
            let position = position_key(position)?;
            tx.execute(
                "INSERT INTO persons (position, name, phone, email, category, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    position,
                    record.name.as_deref(),
                    record.phone.as_deref(),
                    record.email.as_deref(),
                    record.category.as_deref(),
                    record.note.as_deref(),
                ],
            )?;
            for tag in &record.tags {
                tx.execute(
                    "INSERT OR IGNORE INTO person_tags (person_position, tag) VALUES (?1, ?2);",
                    params![position, tag.as_str()],
                )?;
            }
        }

        tx.commit()?;
        Ok(())
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn save_snapshot(&mut self, persons: &[Person]) -> RepoResult<()> {
        let records = persons
            .iter()
            .map(StoredPerson::from_person)
            .collect::<Vec<_>>();
        match self.save_stored(&records) {
            Ok(()) => {
                info!(
                    "event=snapshot_save module=repo status=ok count={}",
                    records.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_save module=repo status=error count={} error={}",
                    records.len(),
                    err
                );
                Err(err)
            }
        }
    }

    fn load_stored(&self) -> RepoResult<Vec<StoredPerson>> {
        let mut stmt = self.conn.prepare(
            "SELECT position, name, phone, email, category, note
             FROM persons
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let position: i64 = row.get("position")?;
            records.push(StoredPerson {
                name: row.get("name")?,
                phone: row.get("phone")?,
                email: row.get("email")?,
                category: row.get("category")?,
                note: row.get("note")?,
                tags: load_tags(&*self.conn, position)?,
            });
        }
        info!(
            "event=snapshot_load module=repo status=ok count={}",
            records.len()
        );
        Ok(records)
    }
}

fn load_tags(conn: &Connection, position: i64) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT tag
         FROM person_tags
         WHERE person_position = ?1
         ORDER BY tag ASC;",
    )?;
    let mut rows = stmt.query([position])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        tags.push(row.get(0)?);
    }
    Ok(tags)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
