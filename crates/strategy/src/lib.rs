//! Croupier Strategy Framework
//!
//! Decides what each lane puts on the table:
//! - `LaneStrategy` trait with Static, Rotating and Chain variants
//! - Streak triggers layered on top of any variant
//! - `Lane`, which binds a configuration to its strategy and handles
//!   session-profit resets
//!
//! ## Flow per spin
//!
//! ```text
//!   LaneState ──► session reset? ──► LaneStrategy::prepare ──┐
//!                                                           ├──► BetTicket
//!   history ────────────────────────► TriggerEvaluator ─────┘
//!
//!   resolved profit ──► LaneStrategy::advance ──► next LaneState
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use croupier_strategy::Lane;
//!
//! let lane = Lane::new(config, settings.limits())?;
//! let mut state = lane.fresh_state();
//! let ticket = lane.prepare(&mut state, &history, &mut ids);
//! ```

pub mod chain;
pub mod lane;
pub mod progression;
pub mod rotating;
pub mod strategy;
pub mod trigger;

// Re-export main types
pub use chain::ChainStrategy;
pub use lane::{BetTicket, Lane};
pub use progression::{FIBONACCI, StaticStrategy};
pub use rotating::RotatingStrategy;
pub use strategy::{LaneStrategy, strategy_for};
pub use trigger::{FiredTrigger, TriggerEvaluator};
