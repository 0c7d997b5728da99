//! Category value object and its swappable validation policy.
//!
//! # Responsibility
//! - Define `CategoryRule`: pattern + canonical casing + messages.
//! - Construct `Category` values against an injected rule.
//!
//! # Invariants
//! - A `Category` value is always stored in the rule's canonical case.
//! - The add-success message depends only on the category value.

use crate::model::fields::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Debug, Display, Formatter};

pub const CONTACT_CONSTRAINTS: &str =
    "Category must be either 'student' or 'colleague' (case-insensitive)";
pub const CLASS_CONSTRAINTS: &str = "Class must be one of the following (case-insensitive): \
1A, 1B, 1C, 1D, 2A, 2B, 2C, 2D, 3A, 3B, 3C, 3D, \
4A, 4B, 4C, 4D, 5A, 5B, 5C, 5D, 6A, 6B, 6C, 6D";
pub const KINDERGARTEN_CONSTRAINTS: &str = "Kindergarten class must be K1 or K2 followed by a \
section A to D (case-insensitive), e.g. K1A or K2D";

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(student|colleague)$").expect("valid contact category regex"));
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-6][A-D]$").expect("valid class regex"));
static KINDERGARTEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^K[12][A-D]$").expect("valid kindergarten regex"));

/// Validation and presentation policy for the category field.
///
/// The pattern is matched against the canonicalized value, so it only needs
/// to describe the canonical case.
#[derive(Clone, Copy)]
pub struct CategoryRule {
    name: &'static str,
    pattern: &'static Regex,
    canonicalize: fn(&str) -> String,
    constraint: &'static str,
    announce: fn(&Category) -> String,
}

impl CategoryRule {
    /// Builds a custom rule from its parts.
    pub fn custom(
        name: &'static str,
        pattern: &'static Regex,
        canonicalize: fn(&str) -> String,
        constraint: &'static str,
        announce: fn(&Category) -> String,
    ) -> Self {
        Self {
            name,
            pattern,
            canonicalize,
            constraint,
            announce,
        }
    }

    /// `student` / `colleague`, stored lowercase.
    pub fn contact() -> Self {
        Self::custom(
            "contact",
            &CONTACT_RE,
            |raw| raw.trim().to_lowercase(),
            CONTACT_CONSTRAINTS,
            |category| format!("New {category} added"),
        )
    }

    /// Primary school grid `1A`..`6D`, stored uppercase.
    pub fn class() -> Self {
        Self::custom(
            "class",
            &CLASS_RE,
            |raw| raw.trim().to_uppercase(),
            CLASS_CONSTRAINTS,
            |category| format!("New student added to class {category}"),
        )
    }

    /// Kindergarten grid `K1A`..`K2D`, stored uppercase.
    pub fn kindergarten() -> Self {
        Self::custom(
            "kindergarten",
            &KINDERGARTEN_RE,
            |raw| raw.trim().to_uppercase(),
            KINDERGARTEN_CONSTRAINTS,
            |category| format!("New pupil added to {category}"),
        )
    }

    /// Resolves a preset by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "contact" => Some(Self::contact()),
            "class" => Some(Self::class()),
            "kindergarten" => Some(Self::kindergarten()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn constraint(&self) -> &'static str {
        self.constraint
    }

    /// Returns whether `raw` is accepted once canonicalized.
    pub fn accepts(&self, raw: &str) -> bool {
        self.pattern.is_match(&(self.canonicalize)(raw))
    }

    /// Success message reported after adding a person in `category`.
    pub fn announce(&self, category: &Category) -> String {
        (self.announce)(category)
    }
}

impl Default for CategoryRule {
    fn default() -> Self {
        Self::contact()
    }
}

impl Debug for CategoryRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

/// Category (or class) label of a person, in canonical case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    value: String,
}

impl Category {
    pub fn new(raw: &str, rule: &CategoryRule) -> Result<Self, ValidationError> {
        let value = (rule.canonicalize)(raw);
        if !rule.pattern.is_match(&value) {
            return Err(ValidationError::InvalidCategory(rule.constraint));
        }
        Ok(Self { value })
    }

    pub fn is_valid(raw: &str, rule: &CategoryRule) -> bool {
        rule.accepts(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
