//! Class labels.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A class label: integer-coded or free text.
///
/// Integers sort before text, integers numerically, text lexicographically.
/// This is the order in which a fitted classifier reports its classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Text(String),
}

impl Label {
    /// Parse a raw cell: integers become `Int`, everything else `Text`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<i64>() {
            Ok(v) => Label::Int(v),
            Err(_) => Label::Text(trimmed.to_string()),
        }
    }

    /// Title-cased display form: first letter of every word upper-cased,
    /// the rest lower-cased (`"iris-setosa"` → `"Iris-Setosa"`).
    pub fn title_case(&self) -> String {
        let raw = self.to_string();
        let mut out = String::with_capacity(raw.len());
        let mut at_word_start = true;
        for ch in raw.chars() {
            if ch.is_alphabetic() {
                if at_word_start {
                    out.extend(ch.to_uppercase());
                } else {
                    out.extend(ch.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(ch);
                at_word_start = true;
            }
        }
        out
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(v) => write!(f, "{v}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Int(a), Label::Int(b)) => a.cmp(b),
            (Label::Int(_), Label::Text(_)) => Ordering::Less,
            (Label::Text(_), Label::Int(_)) => Ordering::Greater,
            (Label::Text(a), Label::Text(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Int(v)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}
