//! Regex-based entity recognizer for DATE and TIME phrases

use regex::Regex;
use std::sync::LazyLock;

use super::{EntityLabel, EntitySpan, PhraseInterpreter};
use crate::error::InterpretError;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Date,
    Time,
}

impl From<Kind> for EntityLabel {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Date => EntityLabel::Date,
            Kind::Time => EntityLabel::Time,
        }
    }
}

const WEEKDAY: &str = r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";
/// Month names. "May" only matches capitalized here; lowercase "may" is
/// usually the modal verb and has its own cue-gated pattern below.
const MONTH: &str = concat!(
    r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|(?-i:May)|june?|july?|aug(?:ust)?",
    r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)"
);
const COUNT: &str = r"(?:\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve)";

static PATTERNS: LazyLock<Vec<(Regex, Kind)>> = LazyLock::new(|| {
    let date = [
        r"\b(?:the\s+)?day\s+after\s+tomorrow\b".to_string(),
        r"\b(?:today|tomorrow|yesterday)\b".to_string(),
        format!(r"\b(?:(?:next|this|last|on)\s+)?{WEEKDAY}\b"),
        r"\b(?:next|this|last)\s+(?:week|month|year)\b".to_string(),
        format!(r"\bin\s+{COUNT}\s+(?:days?|weeks?|months?|years?)\b"),
        format!(r"\b{COUNT}\s+(?:days?|weeks?|months?|years?)\s+ago\b"),
        r"\b\d{4}-\d{2}-\d{2}\b".to_string(),
        r"\b\d{1,2}/\d{1,2}/\d{4}\b".to_string(),
        format!(r"\b(?:on\s+)?{MONTH}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s+\d{{4}}\b)?"),
        format!(
            r"\b(?:on\s+)?(?:the\s+)?\d{{1,2}}(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTH}\b(?:,?\s+\d{{4}}\b)?"
        ),
        // Any-case "may" needs a leading "on", an ordinal, a year or "the ... of"
        r"\bon\s+may\s+\d{1,2}(?:st|nd|rd|th)?\b(?:,?\s+\d{4}\b)?".to_string(),
        r"\bmay\s+\d{1,2}(?:(?:st|nd|rd|th)\b(?:,?\s+\d{4}\b)?|,?\s+\d{4}\b)".to_string(),
        r"\b(?:on\s+)?the\s+\d{1,2}(?:st|nd|rd|th)?\s+of\s+may\b(?:,?\s+\d{4}\b)?".to_string(),
        // Recognized but not resolvable to a single instant
        r"\b(?:the\s+)?weekend\b".to_string(),
        r"\b(?:next|this|last)\s+quarter\b".to_string(),
    ];
    let time = [
        r"\b(?:at\s+)?\d{1,2}(?::[0-5]\d)?\s*(?:(?:am|pm)\b|[ap]\.m\.)".to_string(),
        r"\b(?:at\s+)?(?:[01]?\d|2[0-3]):[0-5]\d\b".to_string(),
        r"\b(?:at\s+)?(?:noon|midnight)\b".to_string(),
        r"\b(?:tonight|this\s+(?:morning|afternoon|evening))\b".to_string(),
        format!(r"\bin\s+{COUNT}\s+(?:hours?|minutes?|mins?)\b"),
        format!(r"\b{COUNT}\s+(?:hours?|minutes?|mins?)\s+ago\b"),
    ];

    date.iter()
        .map(|p| (p, Kind::Date))
        .chain(time.iter().map(|p| (p, Kind::Time)))
        .map(|(p, kind)| (Regex::new(&format!("(?i){p}")).unwrap(), kind))
        .collect()
});

/// Finds DATE and TIME spans with a fixed pattern table.
///
/// When spans overlap the longest wins (ties go to the leftmost), and the
/// survivors are reported in text order.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedInterpreter;

impl RuleBasedInterpreter {
    pub fn new() -> Self {
        Self
    }
}

impl PhraseInterpreter for RuleBasedInterpreter {
    fn entities(&self, text: &str) -> Result<Vec<EntitySpan>, InterpretError> {
        let mut candidates: Vec<(usize, usize, Kind)> = PATTERNS
            .iter()
            .flat_map(|(re, kind)| re.find_iter(text).map(move |m| (m.start(), m.end(), *kind)))
            .collect();

        candidates.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

        let mut accepted: Vec<(usize, usize, Kind)> = Vec::new();
        for candidate in candidates {
            let overlaps = accepted
                .iter()
                .any(|(start, end, _)| candidate.0 < *end && *start < candidate.1);
            if !overlaps {
                accepted.push(candidate);
            }
        }
        accepted.sort_by_key(|(start, _, _)| *start);

        Ok(accepted
            .into_iter()
            .map(|(start, end, kind)| EntitySpan {
                text: text[start..end].to_string(),
                label: kind.into(),
                start,
                end,
            })
            .collect())
    }
}
