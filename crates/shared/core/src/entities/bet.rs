use serde::{Deserialize, Serialize};

use crate::table::Placement;
use crate::values::Money;

/// Unique bet instance identifier.
///
/// Derived from the run, the spin and the bet's position in that spin, so ids
/// are never reused across spins and stay identical across repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BetId {
    pub run: u32,
    pub spin: u32,
    pub seq: u32,
}

impl std::fmt::Display for BetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}.s{}.b{}", self.run, self.spin, self.seq)
    }
}

/// Hands out bet ids for a single spin
#[derive(Debug)]
pub struct BetIdAllocator {
    run: u32,
    spin: u32,
    next: u32,
}

impl BetIdAllocator {
    pub fn new(run: u32, spin: u32) -> Self {
        Self { run, spin, next: 0 }
    }

    pub fn next_id(&mut self) -> BetId {
        let id = BetId {
            run: self.run,
            spin: self.spin,
            seq: self.next,
        };
        self.next += 1;
        id
    }
}

/// A placement with a stake, not yet on the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wager {
    pub placement: Placement,
    pub amount: Money,
}

impl Wager {
    pub fn new(placement: Placement, amount: Money) -> Self {
        Self { placement, amount }
    }
}

/// A bet placed for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    pub id: BetId,
    pub placement: Placement,
    pub amount: Money,
}

impl Bet {
    pub fn new(id: BetId, placement: Placement, amount: Money) -> Self {
        Self {
            id,
            placement,
            amount,
        }
    }

    /// Put a wager on the table under a fresh id
    pub fn place(ids: &mut BetIdAllocator, wager: &Wager) -> Self {
        Self::new(ids.next_id(), wager.placement.clone(), wager.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ids_are_sequential_within_a_spin() {
        let mut ids = BetIdAllocator::new(2, 7);
        let wager = Wager::new(Placement::red(), dec!(5));
        let a = Bet::place(&mut ids, &wager);
        let b = Bet::place(&mut ids, &wager);

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.to_string(), "r2.s7.b0");
        assert_eq!(b.id.to_string(), "r2.s7.b1");
    }

    #[test]
    fn test_ids_differ_across_spins() {
        let first = BetIdAllocator::new(0, 1).next_id();
        let second = BetIdAllocator::new(0, 2).next_id();
        assert_ne!(first, second);
    }
}
