use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, TableError};
use crate::values::{Color, DOUBLE_ZERO};

/// Bet category tag, keys the payout table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetCategory {
    Straight,
    Split,
    Street,
    Corner,
    /// 0, 00, 1, 2, 3 top line
    Basket,
    SixLine,
    Dozen,
    Column,
    Red,
    Black,
    Even,
    Odd,
    Low,
    High,
    /// Category the payout table does not list
    Custom(String),
}

/// A bet category together with the exact set of numbers it wins on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub category: BetCategory,
    /// Winning pocket values (-1 for "00")
    pub numbers: BTreeSet<i8>,
    pub label: String,
}

impl Placement {
    /// Create a placement covering arbitrary pockets
    pub fn new(
        category: BetCategory,
        numbers: impl IntoIterator<Item = i8>,
        label: impl Into<String>,
    ) -> Result<Self> {
        let numbers: BTreeSet<i8> = numbers.into_iter().collect();
        if let Some(bad) = numbers.iter().find(|n| !(DOUBLE_ZERO..=36).contains(*n)) {
            return Err(TableError::InvalidPlacement(format!(
                "pocket {} is not on the wheel",
                bad
            )));
        }
        Ok(Self {
            category,
            numbers,
            label: label.into(),
        })
    }

    fn outside(category: BetCategory, label: &str, filter: impl Fn(i8) -> bool) -> Self {
        Self {
            category,
            numbers: (1..=36).filter(|n| filter(*n)).collect(),
            label: label.to_string(),
        }
    }

    pub fn straight(value: i8) -> Result<Self> {
        let label = if value == DOUBLE_ZERO {
            "00".to_string()
        } else {
            value.to_string()
        };
        Self::new(BetCategory::Straight, [value], label)
    }

    pub fn red() -> Self {
        Self::outside(BetCategory::Red, "Red", |n| Color::of(n) == Color::Red)
    }

    pub fn black() -> Self {
        Self::outside(BetCategory::Black, "Black", |n| Color::of(n) == Color::Black)
    }

    pub fn even() -> Self {
        Self::outside(BetCategory::Even, "Even", |n| n % 2 == 0)
    }

    pub fn odd() -> Self {
        Self::outside(BetCategory::Odd, "Odd", |n| n % 2 == 1)
    }

    pub fn low() -> Self {
        Self::outside(BetCategory::Low, "1-18", |n| n <= 18)
    }

    pub fn high() -> Self {
        Self::outside(BetCategory::High, "19-36", |n| n >= 19)
    }

    /// Dozen 1..=3
    pub fn dozen(which: u8) -> Result<Self> {
        if !(1..=3).contains(&which) {
            return Err(TableError::InvalidPlacement(format!("dozen {}", which)));
        }
        let start = (which as i8 - 1) * 12 + 1;
        Self::new(
            BetCategory::Dozen,
            start..start + 12,
            format!("{}-{}", start, start + 11),
        )
    }

    /// Column 1..=3 (column 1 = 1, 4, 7, ...)
    pub fn column(which: u8) -> Result<Self> {
        if !(1..=3).contains(&which) {
            return Err(TableError::InvalidPlacement(format!("column {}", which)));
        }
        let offset = which as i8;
        Self::new(
            BetCategory::Column,
            (0..12).map(|row| row * 3 + offset),
            format!("Column {}", which),
        )
    }

    /// Street 1..=12 (street 1 = 1, 2, 3)
    pub fn street(row: u8) -> Result<Self> {
        if !(1..=12).contains(&row) {
            return Err(TableError::InvalidPlacement(format!("street {}", row)));
        }
        let start = (row as i8 - 1) * 3 + 1;
        Self::new(
            BetCategory::Street,
            start..start + 3,
            format!("Street {}-{}", start, start + 2),
        )
    }

    pub fn basket() -> Self {
        Self {
            category: BetCategory::Basket,
            numbers: [DOUBLE_ZERO, 0, 1, 2, 3].into_iter().collect(),
            label: "Basket".to_string(),
        }
    }

    /// Whether this placement wins on the given pocket value
    pub fn covers(&self, value: i8) -> bool {
        self.numbers.contains(&value)
    }

    pub fn covered_count(&self) -> usize {
        self.numbers.len()
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
