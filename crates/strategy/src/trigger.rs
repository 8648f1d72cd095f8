//! Streak Triggers
//!
//! A trigger watches one target placement across the run's outcome history
//! and adds its own bet once a hit or miss streak reaches the threshold.

use croupier_core::{SpinResult, TriggerBet, TriggerRule, Wager};

/// A trigger that fired for the coming spin
#[derive(Debug, Clone, PartialEq)]
pub struct FiredTrigger {
    pub wager: Wager,
    pub streak: u32,
    /// Human-readable firing note for the audit step
    pub description: String,
}

/// Checks a lane's enabled triggers against the spin history
#[derive(Debug, Clone, Default)]
pub struct TriggerEvaluator {
    triggers: Vec<TriggerBet>,
}

impl TriggerEvaluator {
    pub fn new(triggers: &[TriggerBet]) -> Self {
        Self {
            triggers: triggers.iter().filter(|t| t.enabled).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Length of the streak ending at the most recent spin
    pub fn streak_length(trigger: &TriggerBet, history: &[SpinResult]) -> u32 {
        let want_hit = trigger.rule == TriggerRule::HitStreak;
        let streak = history
            .iter()
            .rev()
            .take_while(|outcome| trigger.target.covers(outcome.value) == want_hit)
            .count();
        u32::try_from(streak).unwrap_or(u32::MAX)
    }

    /// Every trigger whose streak meets its threshold, in declared order
    pub fn evaluate(&self, history: &[SpinResult]) -> Vec<FiredTrigger> {
        self.triggers
            .iter()
            .filter_map(|trigger| {
                let streak = Self::streak_length(trigger, history);
                (streak >= trigger.threshold).then(|| FiredTrigger {
                    wager: trigger.bet.clone(),
                    streak,
                    description: describe(trigger, streak),
                })
            })
            .collect()
    }
}

fn describe(trigger: &TriggerBet, streak: u32) -> String {
    let name = if trigger.label.is_empty() {
        trigger.target.label.as_str()
    } else {
        trigger.label.as_str()
    };
    let kind = match trigger.rule {
        TriggerRule::MissStreak => "misses",
        TriggerRule::HitStreak => "hits",
    };
    format!(
        "{}: {} {} on {} -> {} on {}",
        name, streak, kind, trigger.target, trigger.bet.amount, trigger.bet.placement
    )
}
