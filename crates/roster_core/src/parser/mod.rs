//! Command-line surface: turns one input line into a typed `Command`.
//!
//! # Responsibility
//! - Split the command word from its arguments and tokenize prefixes.
//! - Validate fields in a fixed order and report the first failure.
//! - Reject repeated single-valued prefixes before any field validation.
//!
//! # Invariants
//! - Parsing never touches the record store.
//! - A bare all-digit argument is always an index, never a name.

pub mod tokenizer;

use crate::command::{Command, Index, PersonRef};
use crate::model::category::{Category, CategoryRule};
use crate::model::fields::{Email, Name, Note, Phone, Tag, ValidationError};
use crate::model::person::Person;
use crate::store::PersonFilter;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokenizer::{
    tokenize, ArgumentMap, PREFIX_CATEGORY, PREFIX_EMAIL, PREFIX_NAME, PREFIX_NOTE, PREFIX_PHONE,
    PREFIX_TAG,
};

pub const MESSAGE_UNKNOWN_COMMAND: &str = "Unknown command";
pub const MESSAGE_DUPLICATE_FIELDS: &str =
    "Multiple values specified for the following single-valued field(s): ";

pub const ADD_USAGE: &str = "add: Adds a person. \
Parameters: n/NAME p/PHONE e/EMAIL c/CATEGORY [no/NOTE] [t/TAG]...\n\
Example: add n/John Doe p/98765432 e/johnd@example.com c/student t/friends";
pub const DELETE_USAGE: &str = "delete: Deletes the person identified by the index number \
used in the displayed person list or by name.\n\
Parameters: INDEX (must be a positive integer) or NAME\n\
Example: delete 1 or delete John Doe";
pub const NOTE_USAGE: &str = "note: Edits the note of the person identified by the index \
number used in the last person listing. Existing note will be overwritten by the input.\n\
Parameters: INDEX (must be a positive integer) no/ [NOTE]\n\
Example: note 1 no/ Allergic to peanut.";
pub const VIEW_USAGE: &str = "view: Displays full information of a contact.\n\
Parameters: INDEX (must be a positive integer)\n\
Example: view 1";
pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of the given \
keywords (case-insensitive).\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: find alice bob";
pub const FIND_PHONE_USAGE: &str = "findphone: Finds all persons whose phone number contains \
any of the given digit sequences.\n\
Parameters: DIGITS [MORE_DIGITS]...\n\
Example: findphone 9435 8765";
pub const FIND_TAG_USAGE: &str = "findtag: Finds all persons with a tag containing any of the \
given keywords (case-insensitive).\n\
Parameters: KEYWORD [MORE_KEYWORDS]...\n\
Example: findtag friends";
pub const LIST_USAGE: &str = "list: Shows every person.";

const SINGLE_VALUED: &[&str] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_CATEGORY,
    PREFIX_NOTE,
];
const ADD_PREFIXES: &[&str] = &[
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_CATEGORY,
    PREFIX_NOTE,
    PREFIX_TAG,
];

/// Parse-stage failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    InvalidFormat { usage: &'static str },
    /// Single-valued prefixes given more than once, de-duplicated.
    DuplicatePrefixes(Vec<&'static str>),
    Validation(ValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(_) => f.write_str(MESSAGE_UNKNOWN_COMMAND),
            Self::InvalidFormat { usage } => write!(f, "Invalid command format! \n{usage}"),
            Self::DuplicatePrefixes(prefixes) => {
                write!(f, "{MESSAGE_DUPLICATE_FIELDS}{}", prefixes.join(" "))
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Usage lines for every command, in help order.
pub fn usage_lines() -> [&'static str; 8] {
    [
        ADD_USAGE,
        DELETE_USAGE,
        NOTE_USAGE,
        VIEW_USAGE,
        FIND_USAGE,
        FIND_PHONE_USAGE,
        FIND_TAG_USAGE,
        LIST_USAGE,
    ]
}

/// Line parser bound to the active category rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandParser {
    rule: CategoryRule,
}

impl CommandParser {
    pub fn new(rule: CategoryRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &CategoryRule {
        &self.rule
    }

    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let trimmed = input.trim();
        let (word, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));
        let args = format!(" {rest}");

        match word {
            "add" => self.parse_add(&args),
            "delete" => parse_delete(&args),
            "note" => parse_note(&args),
            "view" => parse_index_only(&args, VIEW_USAGE).map(Command::View),
            "find" => parse_keywords(rest, FIND_USAGE)
                .map(|keywords| Command::Find(PersonFilter::NameKeywords(keywords))),
            "findphone" => parse_keywords(rest, FIND_PHONE_USAGE)
                .map(|keywords| Command::Find(PersonFilter::PhoneKeywords(keywords))),
            "findtag" => parse_keywords(rest, FIND_TAG_USAGE)
                .map(|keywords| Command::Find(PersonFilter::TagKeywords(keywords))),
            "list" => Ok(Command::List),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_add(&self, args: &str) -> Result<Command, ParseError> {
        let map = tokenize(args, ADD_PREFIXES);
        let required = [PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_CATEGORY];
        if !map.preamble().is_empty() || required.iter().any(|prefix| !map.has(prefix)) {
            return Err(ParseError::InvalidFormat { usage: ADD_USAGE });
        }
        reject_repeated(&map)?;

        let name = Name::new(map.value(PREFIX_NAME).unwrap_or_default())?;
        let phone = Phone::new(map.value(PREFIX_PHONE).unwrap_or_default())?;
        let email = Email::new(map.value(PREFIX_EMAIL).unwrap_or_default())?;
        let category = Category::new(map.value(PREFIX_CATEGORY).unwrap_or_default(), &self.rule)?;
        let note = match map.value(PREFIX_NOTE) {
            Some(raw) => Note::new(raw)?,
            None => Note::empty(),
        };
        let tags = map
            .all_values(PREFIX_TAG)
            .into_iter()
            .map(Tag::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Command::Add(Person::new(
            name, phone, email, category, note, tags,
        )))
    }
}

fn reject_repeated(map: &ArgumentMap) -> Result<(), ParseError> {
    let repeated = map.repeated(SINGLE_VALUED);
    if repeated.is_empty() {
        Ok(())
    } else {
        Err(ParseError::DuplicatePrefixes(repeated))
    }
}

fn parse_delete(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_NAME]);
    reject_repeated(&map)?;
    let invalid = ParseError::InvalidFormat {
        usage: DELETE_USAGE,
    };

    if let Some(name) = map.value(PREFIX_NAME) {
        if !map.preamble().is_empty() || name.is_empty() {
            return Err(invalid);
        }
        return Ok(Command::Delete(PersonRef::ByName(name.to_string())));
    }

    let preamble = map.preamble();
    if preamble.is_empty() {
        return Err(invalid);
    }
    if preamble.chars().all(|ch| ch.is_ascii_digit()) {
        return parse_index(preamble)
            .map(|index| Command::Delete(PersonRef::ByIndex(index)))
            .ok_or(invalid);
    }
    Ok(Command::Delete(PersonRef::ByName(preamble.to_string())))
}

fn parse_note(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[PREFIX_NOTE]);
    let index = parse_index(map.preamble()).ok_or(ParseError::InvalidFormat { usage: NOTE_USAGE })?;
    reject_repeated(&map)?;
    let note = match map.value(PREFIX_NOTE) {
        Some(raw) => Note::new(raw)?,
        None => Note::empty(),
    };
    Ok(Command::Note { index, note })
}

fn parse_index_only(args: &str, usage: &'static str) -> Result<Index, ParseError> {
    parse_index(args.trim()).ok_or(ParseError::InvalidFormat { usage })
}

fn parse_keywords(rest: &str, usage: &'static str) -> Result<Vec<String>, ParseError> {
    let keywords = rest
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<_>>();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(keywords)
}

/// Parses a non-zero unsigned integer without sign or padding.
fn parse_index(raw: &str) -> Option<Index> {
    if raw.is_empty() || !raw.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    raw.parse::<usize>().ok().and_then(Index::from_one_based)
}
