use croupier_core::{LaneConfig, Placement, Settings, StrategyRecord, Wager};
use croupier_runner::{RunnerConfig, SimulationEvent, SimulationRunner, Speed};
use rust_decimal_macros::dec;

fn print_help() {
    eprintln!(
        r#"Croupier - roulette strategy simulator

USAGE:
    croupier [OPTIONS]

OPTIONS:
    --config <PATH>     Load lanes, settings and pacing from a JSON file
    --speed <SPEED>     fast | moderate | step (default: fast)
    --seed <N>          Seed the random wheel for a reproducible batch
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter

EXAMPLES:
    # Flat red bet, 10 runs of 100 spins
    croupier

    # Run with config file
    croupier --config martingale.json --seed 42
"#
    );
}

/// Built-in batch when no config file is given
fn default_config() -> RunnerConfig {
    RunnerConfig {
        record: StrategyRecord {
            lanes: vec![LaneConfig::new(
                "red-lane",
                vec![Wager::new(Placement::red(), dec!(10))],
            )],
            settings: Settings {
                number_of_simulations: 10,
                ..Settings::default()
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut speed: Option<Speed> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            flag @ ("--config" | "-c" | "--speed" | "--seed") => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Error: {} requires an argument", flag);
                    std::process::exit(1);
                };
                match flag {
                    "--speed" => speed = Some(value.parse()?),
                    "--seed" => seed = Some(value.parse()?),
                    _ => config_path = Some(value.clone()),
                }
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            default_config()
        }
    };
    if let Some(speed) = speed {
        config.pacing.speed = speed;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    let speed = config.pacing.speed;

    let mut runner = SimulationRunner::from_config(config);
    let mut events = runner.subscribe();
    let (handle, task) = runner.start()?;

    // Step pacing: every line on stdin releases one spin, "q" cancels
    if speed == Speed::Step {
        let control = handle.clone();
        std::thread::spawn(move || {
            eprintln!("Step mode: press Enter for the next spin, 'q' then Enter to stop");
            for line in std::io::stdin().lines() {
                let Ok(line) = line else { break };
                let sent = if line.trim() == "q" {
                    control.cancel()
                } else {
                    control.step()
                };
                if sent.is_err() {
                    break;
                }
            }
        });
    }

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SimulationEvent::FinalStep { run, step } => {
                    log::info!("Run {} final bankroll {}", run, step.bankroll_after);
                }
                SimulationEvent::Diagnostic(message) => log::warn!("{}", message),
                SimulationEvent::Analysis { text, .. } => println!("{}", text),
                _ => {}
            }
        }
    });

    let report = task.await?;
    drop(handle);

    let stats = &report.stats;
    println!("Batch {}", report.batch_id);
    println!(
        "  runs: {} ({} won, {} lost, {} tied){}",
        stats.runs,
        stats.wins,
        stats.losses,
        stats.ties,
        if report.cancelled { ", cancelled" } else { "" }
    );
    println!("  average final bankroll: {}", stats.avg_final_bankroll);
    println!("  best / worst: {} / {}", stats.best_final_bankroll, stats.worst_final_bankroll);
    println!("  average spins: {}", stats.avg_spins.round_dp(2));

    Ok(())
}
