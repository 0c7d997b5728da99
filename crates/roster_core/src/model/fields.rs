//! Contact field value objects.
//!
//! # Responsibility
//! - Turn raw user/storage strings into canonical, comparable field values.
//! - Expose pure `is_valid` predicates so callers can pre-check input.
//!
//! # Invariants
//! - Normalization always runs before validation.
//! - A constructed value is immutable and always satisfies its predicate.
//! - `Name` and `Email` compare on a case-folded key; `Name` keeps display casing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// Maximum note length in characters.
pub const NOTE_MAX_CHARS: usize = 500;

pub const NAME_CONSTRAINTS: &str = "Names should only contain alphabetic characters, spaces, \
hyphens, and apostrophes, and it should not be blank";
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers must be 8-digit Singapore numbers (spaces and dashes are ignored)";
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain: the \
local-part holds alphanumerics and the special characters +_.- (never at either end or \
consecutive), the domain holds at least two dot-separated labels of alphanumerics and \
inner hyphens, and the last label is at least 2 characters long";
pub const NOTE_CONSTRAINTS: &str =
    "Notes can contain any text except control characters, up to 500 characters.";
pub const TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L} \-']+$").expect("valid name regex"));
static PHONE_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-]").expect("valid phone strip regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[89][0-9]{7}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[^\W_]+(?:[+_.\-][^\W_]+)*@(?:[^\W_]+(?:-[^\W_]+)*\.)+[^\W_]+(?:-[^\W_]+)*$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid tag regex"));

/// Field-level validation failure carrying the fixed constraint message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidName,
    InvalidPhone,
    InvalidEmail,
    /// Category constraints depend on the active category rule.
    InvalidCategory(&'static str),
    InvalidNote,
    InvalidTag(String),
}

impl ValidationError {
    /// Returns the user-facing constraint message for the failed field.
    pub fn constraint(&self) -> &'static str {
        match self {
            Self::InvalidName => NAME_CONSTRAINTS,
            Self::InvalidPhone => PHONE_CONSTRAINTS,
            Self::InvalidEmail => EMAIL_CONSTRAINTS,
            Self::InvalidCategory(message) => message,
            Self::InvalidNote => NOTE_CONSTRAINTS,
            Self::InvalidTag(_) => TAG_CONSTRAINTS,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.constraint())
    }
}

impl Error for ValidationError {}

/// Trims and collapses internal whitespace runs to one space.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Case-insensitive comparison key.
///
/// Upper-casing first expands letters such as `ß` to `SS`, so `Strauß` and
/// `STRAUSS` share the key `strauss`. Folding is idempotent.
pub(crate) fn fold_case(value: &str) -> String {
    value.to_uppercase().to_lowercase()
}

/// Person name with display casing and a case-folded comparison key.
#[derive(Debug, Clone)]
pub struct Name {
    full_name: String,
    normalized: String,
}

impl Name {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let full_name = collapse_whitespace(raw);
        if !is_valid_normalized_name(&full_name) {
            return Err(ValidationError::InvalidName);
        }
        let normalized = fold_case(&full_name);
        Ok(Self {
            full_name,
            normalized,
        })
    }

    pub fn is_valid(raw: &str) -> bool {
        is_valid_normalized_name(&collapse_whitespace(raw))
    }

    /// Canonical display form (original casing, whitespace collapsed).
    pub fn as_str(&self) -> &str {
        &self.full_name
    }

    /// Case-folded projection used for equality and name matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

fn is_valid_normalized_name(value: &str) -> bool {
    !value.is_empty() && NAME_RE.is_match(value)
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Singapore mobile number stored as its 8 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone {
    value: String,
}

impl Phone {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = strip_phone(raw);
        if !PHONE_RE.is_match(&value) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(Self { value })
    }

    pub fn is_valid(raw: &str) -> bool {
        PHONE_RE.is_match(&strip_phone(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn strip_phone(raw: &str) -> String {
    PHONE_STRIP_RE.replace_all(raw, "").into_owned()
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Email address stored trimmed and lower-cased, compared case-folded.
#[derive(Debug, Clone)]
pub struct Email {
    value: String,
    key: String,
}

impl Email {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim().to_lowercase();
        if !is_valid_normalized_email(&value) {
            return Err(ValidationError::InvalidEmail);
        }
        let key = fold_case(&value);
        Ok(Self { value, key })
    }

    pub fn is_valid(raw: &str) -> bool {
        is_valid_normalized_email(&raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn is_valid_normalized_email(value: &str) -> bool {
    if !EMAIL_RE.is_match(value) {
        return false;
    }
    value
        .rsplit('.')
        .next()
        .is_some_and(|last_label| last_label.chars().count() >= 2)
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Free-text note. Empty means "no note"; the text is stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Note {
    value: String,
}

impl Note {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if !Self::is_valid(raw) {
            return Err(ValidationError::InvalidNote);
        }
        Ok(Self {
            value: raw.to_string(),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_valid(raw: &str) -> bool {
        raw.chars().count() <= NOTE_MAX_CHARS && !raw.chars().any(is_control_char)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

fn is_control_char(ch: char) -> bool {
    matches!(ch, '\u{0000}'..='\u{001F}' | '\u{007F}')
}

impl Display for Note {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Free-form alphanumeric label attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    name: String,
}

impl Tag {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();
        if !TAG_RE.is_match(name) {
            return Err(ValidationError::InvalidTag(raw.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn is_valid(raw: &str) -> bool {
        TAG_RE.is_match(raw.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
