//! Listing predicates for the filtered view.

use crate::model::fields::fold_case;
use crate::model::person::Person;

/// Predicate applied to the full list to derive the filtered view.
///
/// Keyword filters match when any keyword matches; an empty keyword list
/// matches nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    /// Shows everyone.
    #[default]
    All,
    /// Keyword is a case-insensitive substring of one word of the name.
    NameKeywords(Vec<String>),
    /// Keyword is a substring of the normalized phone digits.
    PhoneKeywords(Vec<String>),
    /// Keyword is a case-insensitive substring of one tag.
    TagKeywords(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => keywords.iter().any(|keyword| {
                contains_word_ignore_case(person.name().normalized(), keyword)
            }),
            Self::PhoneKeywords(keywords) => keywords
                .iter()
                .any(|keyword| person.phone().as_str().contains(keyword.trim())),
            Self::TagKeywords(keywords) => keywords.iter().any(|keyword| {
                person
                    .tags()
                    .iter()
                    .any(|tag| contains_word_ignore_case(tag.as_str(), keyword))
            }),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

fn contains_word_ignore_case(sentence: &str, keyword: &str) -> bool {
    let keyword = fold_case(keyword.trim());
    if keyword.is_empty() {
        return false;
    }
    sentence
        .split_whitespace()
        .any(|word| fold_case(word).contains(keyword.as_str()))
}
