use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::values::{Color, DOUBLE_ZERO};

/// Normalized result of one spin
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinResult {
    /// -1 for "00", 0..=36 otherwise
    pub value: i8,
    /// "00", "0", "1".."36"
    pub display: String,
    pub color: Color,
}

impl SpinResult {
    /// Build the result for a pocket value, `None` when the value is not on the wheel
    pub fn from_value(value: i8) -> Option<Self> {
        if !(DOUBLE_ZERO..=36).contains(&value) {
            return None;
        }
        let display = if value == DOUBLE_ZERO {
            "00".to_string()
        } else {
            value.to_string()
        };
        Some(Self {
            value,
            display,
            color: Color::of(value),
        })
    }

    /// The single green zero
    pub fn zero() -> Self {
        Self {
            value: 0,
            display: "0".to_string(),
            color: Color::Green,
        }
    }

    pub fn is_green(&self) -> bool {
        self.color == Color::Green
    }
}

impl std::fmt::Display for SpinResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display, self.color)
    }
}

/// A literal outcome token after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutcome {
    pub result: SpinResult,
    /// Set when the token was malformed and degraded to zero
    pub diagnostic: Option<String>,
}

/// Parse one literal outcome token ("0", "00", "1".."36").
///
/// Malformed or out-of-range tokens never fail: they degrade to a green zero
/// and carry a diagnostic so the caller can surface it.
pub fn parse_outcome(token: &str) -> ParsedOutcome {
    let normalized = token.trim();

    if normalized == "00" {
        return ParsedOutcome {
            result: SpinResult {
                value: DOUBLE_ZERO,
                display: "00".to_string(),
                color: Color::Green,
            },
            diagnostic: None,
        };
    }

    let parsed = normalized
        .parse::<i8>()
        .ok()
        .filter(|v| (0..=36).contains(v))
        .and_then(SpinResult::from_value);

    match parsed {
        Some(result) => ParsedOutcome {
            result,
            diagnostic: None,
        },
        None => ParsedOutcome {
            result: SpinResult::zero(),
            diagnostic: Some(format!(
                "Unrecognized outcome '{}', substituting 0",
                normalized
            )),
        },
    }
}

/// Split a fixed-outcome text on whitespace and commas and parse every token.
///
/// With `strict` set, the first malformed token fails the whole sequence.
pub fn parse_outcome_sequence(text: &str, strict: bool) -> Result<Vec<ParsedOutcome>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|token| {
            let parsed = parse_outcome(token);
            if strict && parsed.diagnostic.is_some() {
                Err(TableError::MalformedOutcomeToken {
                    token: token.to_string(),
                })
            } else {
                Ok(parsed)
            }
        })
        .collect()
}
