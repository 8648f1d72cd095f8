//! Table model: pockets, placements and payouts

mod outcome;
mod payout;
mod placement;
mod sequence;

pub use outcome::{ParsedOutcome, SpinResult, parse_outcome, parse_outcome_sequence};
pub use payout::{BetResolution, LaneResolution, PayoutTable, SpinResolver};
pub use placement::{BetCategory, Placement};
pub use sequence::{SEQUENCE_KEYWORDS, parse_sequence};
