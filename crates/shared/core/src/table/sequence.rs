use super::placement::Placement;
use crate::error::{Result, TableError};

/// Keywords accepted in a rotation sequence
pub const SEQUENCE_KEYWORDS: &str = "red, black, even, odd, 1-18/low, 19-36/high";

fn keyword_placement(keyword: &str) -> Option<Placement> {
    match keyword {
        "red" => Some(Placement::red()),
        "black" => Some(Placement::black()),
        "even" => Some(Placement::even()),
        "odd" => Some(Placement::odd()),
        "1-18" | "low" => Some(Placement::low()),
        "19-36" | "high" => Some(Placement::high()),
        _ => None,
    }
}

/// Compile a comma-separated rotation sequence into placements.
///
/// Keywords are case-insensitive and blank segments are skipped. The first
/// unknown keyword fails the whole parse.
pub fn parse_sequence(text: &str) -> Result<Vec<Placement>> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|token| {
            keyword_placement(&token.to_ascii_lowercase()).ok_or_else(|| {
                TableError::InvalidSequenceToken {
                    token: token.to_string(),
                    allowed: SEQUENCE_KEYWORDS.to_string(),
                }
            })
        })
        .collect()
}
