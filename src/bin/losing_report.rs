use std::{error::Error, time::Instant};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use sticky_nim::{main_losing_configs, Board, Configuration, Group, Settings, Solver, SolverOptions};
use tracing_subscriber::EnvFilter;

const SCREEN_WIDTH: usize = 80;

/// Builds the losing configurations of Sticky-Nim and reports on them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of sticks on the board
    board_size: usize,

    /// Maximum number of sticks taken per turn
    #[arg(short, long, default_value_t = 3)]
    max_take: usize,

    /// Only record [1, 1, ..., 1] for odd stick counts (odd max take >= 3 only)
    #[arg(long)]
    odd_shortcut: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Seed for the board layouts of the round-trip check
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "targets")]
enum Outcome {
    Unknown,
    Losing,
    Winning(Vec<Configuration>),
}

#[derive(Serialize)]
struct Probe {
    config: Configuration,
    outcome: Outcome,
}

#[derive(Serialize)]
struct BoardRow {
    board: String,
    config: Configuration,
    groups: Vec<Group>,
}

#[derive(Serialize)]
struct Report {
    settings: Settings,
    build_ms: f64,
    configurations: usize,
    losing: usize,
    main_losing: Vec<Configuration>,
    probes: Vec<Probe>,
    boards: Vec<BoardRow>,
    round_trip_failures: Vec<Configuration>,
}

fn probe_configs(board_size: usize) -> Vec<Configuration> {
    let mut configs: Vec<Configuration> = [
        vec![board_size],
        vec![3, 2, 1],
        vec![6, 5, 4, 4, 2, 1],
        vec![6, 5, 2, 1],
        vec![6, 4, 2],
        vec![5, 4, 1],
        vec![21, 1],
        vec![21, 5],
    ]
    .into_iter()
    .map(Configuration::new)
    .collect();
    configs.extend((1..10).map(|n| Configuration::new(vec![18 - n, n])));
    let tail = Configuration::new(vec![5, 1]);
    configs.extend((1..=10).map(|n| Configuration::new(vec![n, n]).composite(&tail)));
    configs
}

fn build_report(args: &Args) -> Result<Report, Box<dyn Error>> {
    let settings = Settings::new(args.board_size, args.max_take)?;
    let mut solver = Solver::with_options(SolverOptions {
        odd_shortcut: args.odd_shortcut,
    });

    let start = Instant::now();
    solver.set_rules(settings);
    let build_ms = start.elapsed().as_secs_f64() * 1000.0;

    let losing = solver.losing_configs()?;
    let main_losing = main_losing_configs(&losing);

    let configs = probe_configs(settings.board_size());
    let mut probes = vec![];
    for config in &configs {
        let outcome = if config.sticks() > settings.board_size() {
            Outcome::Unknown
        } else {
            let targets = solver.reachable_losing_configs(config)?;
            if targets.is_empty() {
                Outcome::Losing
            } else {
                Outcome::Winning(targets)
            }
        };
        probes.push(Probe {
            config: config.clone(),
            outcome,
        });
    }

    let mut boards = vec![];
    for cells in ["", "-", "|", "-----", "|||||", "-||||", "||||-", "|-|||", "||-||", "|-|-|"] {
        let board: Board = cells.parse()?;
        boards.push(BoardRow {
            board: board.to_string(),
            config: board.to_config(),
            groups: board.to_groups(),
        });
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut round_trip_failures = vec![];
    for config in &configs {
        let board = Board::from_config_shuffled(config, None, &mut rng)?;
        if &board.to_config() != config {
            round_trip_failures.push(config.clone());
        }
    }

    Ok(Report {
        settings,
        build_ms,
        configurations: solver.table().len(),
        losing: losing.len(),
        main_losing,
        probes,
        boards,
        round_trip_failures,
    })
}

fn print_report(report: &Report) {
    println!("{:=^width$}", " Sticky-Nim ==== AI Test ", width = SCREEN_WIDTH);
    println!("    Board size:  {} sticks", report.settings.board_size());
    println!("    Max take:    {} sticks per turn", report.settings.max_take());
    println!("{:-^width$}", " Main losing configurations ", width = SCREEN_WIDTH);
    for config in &report.main_losing {
        println!("{config}");
    }

    println!("{}", "-".repeat(SCREEN_WIDTH));
    let share = report.losing as f64 / report.configurations.max(1) as f64 * 100.0;
    println!("Configurations: {}", report.configurations);
    println!(
        "Losing configurations: {} ({share:.2} %) (built in {:.1} ms)",
        report.losing, report.build_ms
    );
    println!("Main losing configurations: {}", report.main_losing.len());
    println!("{}", "-".repeat(SCREEN_WIDTH));

    for probe in &report.probes {
        match &probe.outcome {
            Outcome::Unknown => println!("{} -> (unknown)", probe.config),
            Outcome::Losing => println!("{} -> losing", probe.config),
            Outcome::Winning(targets) => {
                let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
                println!("{} -> [{}]", probe.config, targets.join(", "));
            }
        }
    }

    println!("{}", "-".repeat(SCREEN_WIDTH));
    println!("Board, Configuration, Groups");
    for row in &report.boards {
        let groups: Vec<String> = row.groups.iter().map(|g| format!("({}, {})", g.start, g.size)).collect();
        println!("{}, {}, [{}]", row.board, row.config, groups.join(", "));
    }
    for config in &report.round_trip_failures {
        println!("Incorrect conversion of {config}");
    }
    println!("{}", "=".repeat(SCREEN_WIDTH));
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let report = build_report(&args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}
