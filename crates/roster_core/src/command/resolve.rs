//! Person reference resolution.
//!
//! # Responsibility
//! - Map a user reference (display index or free-text name) onto the
//!   current filtered view.
//! - Delegate multi-candidate choices to an injected `Disambiguator`.
//!
//! # Invariants
//! - Exact-name matches always win over partial matches; the two tiers are
//!   never merged into one candidate list.
//! - A single exact match resolves without prompting.
//! - Candidates keep filtered-view order.
//! - Matching is case-insensitive on the whole normalized name, never
//!   token-level.

use crate::command::{CommandError, CommandResult};
use crate::model::fields::{collapse_whitespace, fold_case};
use crate::model::person::Person;
use log::info;
use std::fmt::{Display, Formatter};

/// Position in a displayed list. Stored zero-based, shown one-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for `0`, which has no one-based meaning.
    pub fn from_one_based(value: usize) -> Option<Self> {
        value.checked_sub(1).map(Self)
    }

    pub fn from_zero_based(value: usize) -> Self {
        Self(value)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

/// User reference to a target person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonRef {
    ByIndex(Index),
    ByName(String),
}

/// Which matching tier produced a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Several records share the exact normalized name.
    Exact,
    /// No exact match; names containing the reference as a substring.
    Partial,
}

/// Outcome of matching a reference against the filtered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Unique(&'a Person),
    Ambiguous {
        tier: MatchTier,
        candidates: Vec<&'a Person>,
    },
}

/// Request passed to a `Disambiguator`.
#[derive(Debug, Clone, Copy)]
pub struct Disambiguation<'a> {
    pub tier: MatchTier,
    pub reference: &'a str,
    pub candidates: &'a [&'a Person],
}

impl Disambiguation<'_> {
    /// Header line shown above the numbered candidate list.
    pub fn header(&self) -> String {
        match self.tier {
            MatchTier::Exact => format!(
                "{} contacts are named `{}`. Enter the number of the one to use:",
                self.candidates.len(),
                self.reference
            ),
            MatchTier::Partial => "Found the following matches:".to_string(),
        }
    }

    /// Candidate lines numbered from 1, in view order.
    pub fn numbered_lines(&self) -> Vec<String> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(position, person)| format!("{}. {}", position + 1, person.name()))
            .collect()
    }
}

/// Answer from a `Disambiguator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// One-based position in the candidate list.
    Selected(Index),
    Cancelled,
}

/// Capability that narrows a candidate list to one person or a cancellation.
///
/// Implemented by console prompts, UI dialogs and scripted test doubles.
pub trait Disambiguator {
    fn choose(&mut self, request: &Disambiguation<'_>) -> Choice;
}

/// Disambiguator that cancels every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct CancelAll;

impl Disambiguator for CancelAll {
    fn choose(&mut self, _request: &Disambiguation<'_>) -> Choice {
        Choice::Cancelled
    }
}

/// Looks up a display index in the filtered view.
pub fn resolve_index<'a>(view: &[&'a Person], index: Index) -> CommandResult<&'a Person> {
    view.get(index.zero_based())
        .copied()
        .ok_or(CommandError::InvalidIndex)
}

/// Case-folds and whitespace-normalizes a name reference.
///
/// Produces the same key as `Name::normalized`, so `delete STRAUSS` finds
/// a stored `Strauß`.
pub fn normalize_reference(raw: &str) -> String {
    fold_case(&collapse_whitespace(raw))
}

/// Matches a reference against the view without prompting.
///
/// # Errors
/// - `InvalidIndex` when an index is outside the view.
/// - `NoMatch` when a name matches neither exactly nor partially.
pub fn match_reference<'a>(
    view: &[&'a Person],
    reference: &PersonRef,
) -> CommandResult<Resolution<'a>> {
    let raw_name = match reference {
        PersonRef::ByIndex(index) => return resolve_index(view, *index).map(Resolution::Unique),
        PersonRef::ByName(raw_name) => raw_name,
    };

    let wanted = normalize_reference(raw_name);
    let exact = view
        .iter()
        .copied()
        .filter(|person| person.name().normalized() == wanted)
        .collect::<Vec<_>>();
    match exact.len() {
        1 => return Ok(Resolution::Unique(exact[0])),
        0 => {}
        _ => {
            return Ok(Resolution::Ambiguous {
                tier: MatchTier::Exact,
                candidates: exact,
            })
        }
    }

    let partial = if wanted.is_empty() {
        Vec::new()
    } else {
        view.iter()
            .copied()
            .filter(|person| person.name().normalized().contains(wanted.as_str()))
            .collect::<Vec<_>>()
    };
    if partial.is_empty() {
        return Err(CommandError::NoMatch(collapse_whitespace(raw_name)));
    }

    Ok(Resolution::Ambiguous {
        tier: MatchTier::Partial,
        candidates: partial,
    })
}

/// Resolves a reference to exactly one person, prompting when ambiguous.
///
/// # Errors
/// - Everything `match_reference` returns.
/// - `Cancelled` when the disambiguator cancels.
/// - `InvalidIndex` when the disambiguator picks outside the candidates.
pub fn resolve_reference<'a>(
    view: &[&'a Person],
    reference: &PersonRef,
    disambiguator: &mut dyn Disambiguator,
) -> CommandResult<&'a Person> {
    let (tier, candidates) = match match_reference(view, reference)? {
        Resolution::Unique(person) => return Ok(person),
        Resolution::Ambiguous { tier, candidates } => (tier, candidates),
    };

    let display_reference = match reference {
        PersonRef::ByName(raw_name) => collapse_whitespace(raw_name),
        PersonRef::ByIndex(index) => index.to_string(),
    };
    let request = Disambiguation {
        tier,
        reference: display_reference.as_str(),
        candidates: &candidates,
    };
    info!(
        "event=disambiguation module=command status=start tier={} candidates={}",
        tier_label(tier),
        candidates.len()
    );

    match disambiguator.choose(&request) {
        Choice::Selected(position) => {
            let chosen = candidates
                .get(position.zero_based())
                .copied()
                .ok_or(CommandError::InvalidIndex)?;
            info!(
                "event=disambiguation module=command status=ok tier={} position={}",
                tier_label(tier),
                position
            );
            Ok(chosen)
        }
        Choice::Cancelled => {
            info!(
                "event=disambiguation module=command status=cancelled tier={}",
                tier_label(tier)
            );
            Err(CommandError::Cancelled)
        }
    }
}

fn tier_label(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::Exact => "exact",
        MatchTier::Partial => "partial",
    }
}
