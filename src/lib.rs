//! # Tower of Hanoi Solver Library
//!
//! This library solves the three-peg Tower of Hanoi puzzle with generic
//! state-space search: an A* best-first search and a breadth-first search
//! sharing the same configuration model, move generation, deduplication and
//! path reconstruction. A closed-form recursive solver is included as an
//! oracle for the search results.
//!
//! It is used by two binaries:
//! - `hanoi`: Solves one instance with A*, BFS or the recursive formula and
//!   prints every stage of the solution.
//! - `strategy_benchmark`: Runs A* and BFS from seeded random start
//!   configurations and compares the work each strategy does.
//!
//! ## Modules
//! - `engine`: Pegs, moves and the `Configuration` type, plus the
//!   `MoveGenerator` trait and its rule-abiding implementation.
//! - `heuristics`: The admissible disks-off-goal estimate used by A*.
//! - `frontier`: The node arena and the A* and FIFO frontiers.
//! - `solver`: Search configuration, the search driver and the `Solution` it returns.
//! - `recursive`: The closed-form canonical move sequence.
//! - `utils`: Parsing configurations from text.
//! - `error`: The crate's error type.
//!
//! ## Example
//! ```
//! use hanoi_solver::solver::{solve, SearchConfig, Strategy};
//!
//! let solution = solve(&SearchConfig::new(3, 2).with_strategy(Strategy::AStar)).unwrap();
//! assert_eq!(solution.move_count(), 7);
//! for (mv, stage) in solution.moves.iter().zip(&solution.stages[1..]) {
//!     println!("{mv}: {stage}");
//! }
//! ```

pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristics;
pub mod recursive;
pub mod solver;
pub mod utils;

pub use error::{Error, Result};
pub use solver::{solve, SearchConfig, Solution, Strategy};
