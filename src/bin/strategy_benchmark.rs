use clap::Parser;
use hanoi_solver::engine::{Configuration, Peg};
use hanoi_solver::solver::{SearchConfig, SearchStats, Solver, Strategy};
use std::collections::HashMap;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

const STRATEGIES: [Strategy; 2] = [Strategy::AStar, Strategy::Bfs];

#[derive(Parser, Debug)]
#[command(author, version, about = "Compare A* and BFS on random start configurations", long_about = None)]
struct Args {
    /// Number of disks
    #[arg(short, long, default_value_t = 6)]
    disks: usize,

    /// Number of random start configurations to evaluate
    #[arg(short, long, default_value_t = 20)]
    configurations: u64,

    /// Seed of the first configuration; later ones use consecutive seeds
    #[arg(long, default_value_t = 0)]
    start_seed: u64,

    /// Goal peg index (0 = A, 1 = B, 2 = C)
    #[arg(short, long, default_value_t = 2)]
    goal: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let goal = match Peg::from_index(args.goal) {
        Ok(goal) => goal,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let solver = Solver::new();
    let mut all_stats: HashMap<Strategy, Vec<SearchStats>> = HashMap::new();
    let mut disagreements = 0;

    println!(
        "Evaluating {} random configurations of {} disks (goal peg {})...",
        args.configurations, args.disks, goal
    );

    for offset in 0..args.configurations {
        let seed = args.start_seed + offset;
        let start = Configuration::random_with_seed(args.disks, seed);
        println!("\nConfiguration {} (Seed: {}): {}", offset, seed, start);

        let mut lengths = Vec::with_capacity(STRATEGIES.len());
        for strategy in STRATEGIES {
            let config = SearchConfig::new(args.disks, args.goal)
                .with_strategy(strategy)
                .with_start(start.clone());
            match solver.solve(&config) {
                Ok(solution) => {
                    let stats = solution.stats;
                    println!(
                        "  Strategy: {:<4} Moves: {:<5} Expanded: {:<7} Generated: {:<7} Peak frontier: {}",
                        strategy.to_string(),
                        solution.move_count(),
                        stats.expanded,
                        stats.generated,
                        stats.max_frontier
                    );
                    lengths.push(solution.move_count());
                    all_stats.entry(strategy).or_default().push(stats);
                }
                Err(err) => {
                    eprintln!("Error: {strategy} failed on seed {seed}: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
        if lengths.windows(2).any(|w| w[0] != w[1]) {
            eprintln!("Warning: strategies disagree on the optimal length for seed {seed}: {lengths:?}");
            disagreements += 1;
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("--- Average Work ---");

    let mut averages: Vec<(Strategy, f64, f64)> = all_stats
        .iter()
        .filter(|(_, runs)| !runs.is_empty())
        .map(|(strategy, runs)| {
            let count = runs.len() as f64;
            let expanded = runs.iter().map(|s| s.expanded).sum::<usize>() as f64 / count;
            let generated = runs.iter().map(|s| s.generated).sum::<usize>() as f64 / count;
            (*strategy, expanded, generated)
        })
        .collect();
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (strategy, expanded, generated) in averages {
        println!(
            "Strategy {:<4}: Average expanded = {:.2}, average generated = {:.2}",
            strategy.to_string(),
            expanded,
            generated
        );
    }

    if disagreements > 0 {
        eprintln!("{disagreements} configuration(s) produced differing solution lengths.");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
