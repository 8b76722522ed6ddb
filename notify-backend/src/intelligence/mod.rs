//! Temporal phrase interpretation
//!
//! Two capabilities sit behind traits so detection logic never depends on a
//! particular model:
//! - [`PhraseInterpreter`] finds labeled entity spans in free text
//! - [`DateResolver`] turns one phrase into a concrete timestamp
//!
//! The built-in implementations are rule based: a regex recognizer and a
//! chrono relative-date resolver.

mod recognizer;
mod resolver;

pub use recognizer::RuleBasedInterpreter;
pub use resolver::RelativeDateResolver;

use chrono::NaiveDateTime;

use crate::error::InterpretError;

/// Label attached to a recognized span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    Date,
    Time,
    /// Any label the interpreter emits that isn't temporal
    Other(String),
}

impl EntityLabel {
    pub fn is_temporal(&self) -> bool {
        matches!(self, EntityLabel::Date | EntityLabel::Time)
    }
}

/// A labeled span of the input text (byte offsets)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

pub trait PhraseInterpreter: Send + Sync {
    /// Entity spans found in `text`, in the order they should be reported
    fn entities(&self, text: &str) -> Result<Vec<EntitySpan>, InterpretError>;
}

/// Outcome of resolving a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Parsed { timestamp: NaiveDateTime },
    Unparsed,
}

pub trait DateResolver: Send + Sync {
    /// Resolve a phrase relative to `now`
    fn resolve(&self, phrase: &str, now: NaiveDateTime) -> Resolution;
}
