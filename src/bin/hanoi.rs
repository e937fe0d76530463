use clap::{Parser, ValueEnum};
use hanoi_solver::engine::{Configuration, Move};
use hanoi_solver::recursive::canonical_moves;
use hanoi_solver::solver::{SearchConfig, Solver, Strategy, START_PEG};
use hanoi_solver::utils::configuration_from_str;
use hanoi_solver::{Error, Result};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Method {
    /// A* search with the disks-off-goal heuristic
    Astar,
    /// Breadth-first search
    Bfs,
    /// Closed-form recursive solution (no search)
    Recursive,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve the Tower of Hanoi puzzle", long_about = None)]
struct Args {
    /// Number of disks
    #[arg(default_value_t = 3)]
    disks: usize,

    /// Goal peg index (0 = A, 1 = B, 2 = C)
    #[arg(short, long, default_value_t = 2)]
    goal: usize,

    /// Solving method
    #[arg(short, long, value_enum, default_value_t = Method::Astar)]
    strategy: Method,

    /// Start layout as "A | B | C", each peg listed bottom to top, e.g. "3 | 2 1 |".
    /// Defaults to every disk on peg A
    #[arg(long)]
    start: Option<String>,

    /// Give up after this many node expansions
    #[arg(long)]
    node_limit: Option<usize>,

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

fn print_stages(stages: &[Configuration], moves: &[Move]) {
    println!("Stage 0 (Initial): {}", stages[0]);
    for (i, (mv, stage)) in moves.iter().zip(&stages[1..]).enumerate() {
        println!("Stage {} (Move {}): {}", i + 1, mv, stage);
    }
}

fn run_recursive(args: &Args) -> Result<()> {
    if args.start.is_some() {
        return Err(Error::InvalidConfiguration {
            message: "the recursive method only solves from a full tower on peg A".to_string(),
        });
    }
    let (start, goal) = SearchConfig::new(args.disks, args.goal).validate()?;
    println!("Tower of Hanoi using the recursive formula.");
    let moves = canonical_moves(args.disks, START_PEG, goal);
    let stages = start.replay(&moves)?;
    println!("Solution found in {} moves.\n", moves.len());
    print_stages(&stages, &moves);
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let strategy = match args.strategy {
        Method::Recursive => return run_recursive(args),
        Method::Astar => Strategy::AStar,
        Method::Bfs => Strategy::Bfs,
    };

    let mut config = SearchConfig::new(args.disks, args.goal).with_strategy(strategy);
    if let Some(start) = args.start.as_deref() {
        config = config.with_start(configuration_from_str(start)?);
    }
    if let Some(limit) = args.node_limit {
        config = config.with_node_limit(limit);
    }

    println!("Tower of Hanoi using {} search.", strategy);
    if strategy == Strategy::AStar {
        println!("Heuristic: number of disks not on the goal peg (admissible).");
    }

    let solution = Solver::new().solve(&config)?;
    println!("Solution found in {} moves.\n", solution.move_count());
    print_stages(&solution.stages, &solution.moves);

    let stats = solution.stats;
    println!(
        "\nExpanded {} nodes, generated {}, peak frontier {}, {} nodes stored.",
        stats.expanded, stats.generated, stats.max_frontier, stats.nodes
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_internal() {
                eprintln!("Internal error (please report): {err}");
            } else {
                eprintln!("Error: {err}");
            }
            ExitCode::FAILURE
        }
    }
}
