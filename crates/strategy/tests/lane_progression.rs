//! Lanes played against real outcomes through the spin resolver

use croupier_core::{
    ActionKind, BetIdAllocator, ChainAction, ChainConfig, LaneConfig, Layout, Placement,
    ProgressionAction, ProgressionMode, SpinResolver, SpinResult, TableLimits, TriggerBet,
    TriggerRule, Wager,
};
use croupier_strategy::Lane;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn limits() -> TableLimits {
    TableLimits {
        min: dec!(1),
        max: dec!(500),
    }
}

fn outcome(value: i8) -> SpinResult {
    SpinResult::from_value(value).unwrap()
}

/// Play `values` through a lane, returning (wager, profit) per spin
fn play(lane: &Lane, values: &[i8]) -> Vec<(Decimal, Decimal)> {
    let resolver = SpinResolver::default();
    let mut state = lane.fresh_state();
    let mut history = Vec::new();
    let mut trace = Vec::new();

    for (spin, value) in values.iter().enumerate() {
        let mut ids = BetIdAllocator::new(0, spin as u32);
        let ticket = lane.prepare(&mut state, &history, &mut ids);
        let result = outcome(*value);
        let resolution = resolver.resolve(&ticket.bets, &result);
        state = lane.settle(&state, &ticket, resolution.profit);
        trace.push((ticket.wager, resolution.profit));
        history.push(result);
    }
    trace
}

#[test]
fn test_martingale_doubles_until_a_win() {
    init_logger();

    let mut config = LaneConfig::new("red-lane", vec![Wager::new(Placement::red(), dec!(5))]);
    config.progression.on_win = ProgressionAction::new(ActionKind::Reset);
    config.progression.on_loss = ProgressionAction::new(ActionKind::Multiply);
    let lane = Lane::new(config, limits()).unwrap();

    // black, black, green, red, black
    let trace = play(&lane, &[2, 4, 0, 1, 6]);
    let wagers: Vec<Decimal> = trace.iter().map(|(w, _)| *w).collect();
    let profits: Vec<Decimal> = trace.iter().map(|(_, p)| *p).collect();

    assert_eq!(wagers, vec![dec!(5), dec!(10), dec!(20), dec!(40), dec!(5)]);
    assert_eq!(
        profits,
        vec![dec!(-5), dec!(-10), dec!(-20), dec!(40), dec!(-5)]
    );
}

#[test]
fn test_trigger_adds_to_chain_bets() {
    init_logger();

    let mut config = LaneConfig::new("chain-lane", Vec::new()).with_trigger(TriggerBet {
        label: "Zero hunt".to_string(),
        target: Placement::straight(0).unwrap(),
        rule: TriggerRule::MissStreak,
        threshold: 2,
        bet: Wager::new(Placement::straight(0).unwrap(), dec!(1)),
        enabled: true,
    });
    config.progression.mode = ProgressionMode::Chain;
    config.progression.chain = ChainConfig {
        steps: vec![
            Layout::new("even", vec![Wager::new(Placement::even(), dec!(10))]),
            Layout::new("odd", vec![Wager::new(Placement::odd(), dec!(10))]),
        ],
        on_win: ChainAction::DoNothing,
        on_loss: ChainAction::NextChainStep,
        looping: true,
    };
    let lane = Lane::new(config, limits()).unwrap();

    // 3 (odd) loses the even step, 8 (even) loses the odd step, then the
    // trigger joins on the third spin
    let trace = play(&lane, &[3, 8, 0]);
    assert_eq!(trace[0], (dec!(10), dec!(-10)));
    assert_eq!(trace[1], (dec!(10), dec!(-10)));
    // even loses on zero, straight-up zero pays 35
    assert_eq!(trace[2], (dec!(11), dec!(25)));
}
