use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Money amounts (bankroll, stakes, profits) - Decimal keeps the
/// bankroll identity exact across thousands of spins
pub type Money = Decimal;

/// Numeric value of the "00" pocket
pub const DOUBLE_ZERO: i8 = -1;

/// The canonical 18 red numbers of the wheel
pub const RED_NUMBERS: [i8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Pocket color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    /// Color of a pocket value (-1 for "00", 0..=36)
    pub fn of(value: i8) -> Self {
        if value <= 0 {
            Color::Green
        } else if RED_NUMBERS.contains(&value) {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
