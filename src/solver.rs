use crate::engine::{Configuration, Move, MoveGenerator, Peg, StandardMoves, MAX_DISKS};
use crate::error::{Error, Result};
use crate::frontier::{AStarFrontier, FifoFrontier, Frontier, NodeArena, NodeId, SearchNode};
use crate::heuristics::{DisksOffGoal, Heuristic};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, trace, warn};

/// Peg holding every disk in the default start configuration.
pub const START_PEG: Peg = Peg::A;

/// Order in which the search driver explores the state space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Best-first by `f = g + h`. Configurations are marked explored when
    /// popped for expansion and never reopened.
    #[default]
    AStar,
    /// Breadth-first. Configurations are marked explored as soon as they are
    /// generated, so each one is queued at most once.
    Bfs,
}

impl Strategy {
    /// Returns `true` if configurations enter the explored set on generation
    /// rather than on expansion.
    fn marks_on_generation(self) -> bool {
        matches!(self, Strategy::Bfs)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AStar => write!(f, "A*"),
            Strategy::Bfs => write!(f, "BFS"),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Strategy::AStar),
            "bfs" => Ok(Strategy::Bfs),
            _ => Err(Error::UnknownStrategy { name: s.to_string() }),
        }
    }
}

/// Parameters of one search request.
///
/// # Examples
///
/// ```
/// use hanoi_solver::solver::{SearchConfig, Strategy};
///
/// let config = SearchConfig::new(4, 2)
///     .with_strategy(Strategy::Bfs)
///     .with_node_limit(10_000);
/// let solution = hanoi_solver::solver::solve(&config).unwrap();
/// assert_eq!(solution.move_count(), 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of disks, `1..=MAX_DISKS`.
    pub num_disks: usize,
    /// Index of the peg every disk must end on, `0..=2`.
    pub goal_peg: usize,
    pub strategy: Strategy,
    /// Start configuration; all disks on `START_PEG` when `None`.
    pub start: Option<Configuration>,
    /// Upper bound on node expansions before giving up.
    pub node_limit: Option<usize>,
}

impl SearchConfig {
    /// Creates a request with the default strategy (A*), the standard start
    /// configuration and no node limit.
    pub fn new(num_disks: usize, goal_peg: usize) -> Self {
        Self {
            num_disks,
            goal_peg,
            strategy: Strategy::default(),
            start: None,
            node_limit: None,
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Search from `start` instead of the standard start configuration.
    pub fn with_start(mut self, start: Configuration) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Checks the request and resolves the start configuration and goal peg.
    pub fn validate(&self) -> Result<(Configuration, Peg)> {
        if self.num_disks == 0 || self.num_disks > MAX_DISKS {
            return Err(Error::InvalidDiskCount {
                num_disks: self.num_disks,
                max: MAX_DISKS,
            });
        }
        let goal = Peg::from_index(self.goal_peg)?;
        let start = match &self.start {
            Some(start) if start.num_disks() != self.num_disks => {
                return Err(Error::invalid_configuration(format!(
                    "start configuration holds {} disks but {} were requested",
                    start.num_disks(),
                    self.num_disks
                )));
            }
            Some(start) => start.clone(),
            None => Configuration::initial(self.num_disks, START_PEG),
        };
        Ok((start, goal))
    }
}

/// Counters collected during one search run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expanded: usize,
    /// Successor configurations produced by the move generator.
    pub generated: usize,
    /// Successors dropped because their configuration was already explored.
    pub already_explored: usize,
    /// Successors turned away by the frontier's insertion policy.
    pub rejected: usize,
    /// Popped entries skipped because their configuration was explored meanwhile.
    pub stale_skips: usize,
    /// Largest frontier size observed.
    pub max_frontier: usize,
    /// Nodes stored in the arena when the search ended.
    pub nodes: usize,
}

/// Receives search events.
/// All methods default to doing nothing.
pub trait SearchObserver {
    /// Called for each node taken from the frontier for expansion, including
    /// the goal node. Stale entries that get skipped are not reported.
    #[inline(always)]
    fn selected(&mut self, _node: &SearchNode) {}
}

/// Observer that ignores all events.
impl SearchObserver for () {}

/// Result of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub strategy: Strategy,
    pub goal: Peg,
    /// Moves from the start configuration to the goal, in order.
    pub moves: Vec<Move>,
    /// `stages[0]` is the start configuration and `stages[i]` the configuration
    /// after `moves[i - 1]`.
    pub stages: Vec<Configuration>,
    pub stats: SearchStats,
}

impl Solution {
    /// Number of moves, equal to the path cost of the goal node.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn start(&self) -> &Configuration {
        &self.stages[0]
    }

    pub fn final_configuration(&self) -> &Configuration {
        &self.stages[self.stages.len() - 1]
    }
}

/// Walks the producing-node links from `goal_id` back to the start node and
/// returns the moves and per-stage configurations in start-to-goal order.
pub fn reconstruct_path(arena: &NodeArena, goal_id: NodeId) -> (Vec<Move>, Vec<Configuration>) {
    let mut moves = Vec::new();
    let mut stages = Vec::new();
    for node in arena.ancestry(goal_id) {
        stages.push(node.configuration.clone());
        if let Some(mv) = node.mv {
            moves.push(mv);
        }
    }
    moves.reverse();
    stages.reverse();
    (moves, stages)
}

/// State-space search driver, generic over the move generator and heuristic.
#[derive(Clone, Debug, Default)]
pub struct Solver<G = StandardMoves, H = DisksOffGoal> {
    generator: G,
    heuristic: H,
}

impl Solver {
    /// Solver using the puzzle rules and the disks-off-goal heuristic.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: MoveGenerator, H: Heuristic> Solver<G, H> {
    pub fn with_parts(generator: G, heuristic: H) -> Self {
        Self {
            generator,
            heuristic,
        }
    }

    pub fn solve(&self, config: &SearchConfig) -> Result<Solution> {
        self.solve_observed(config, &mut ())
    }

    /// Runs the search described by `config`, reporting events to `observer`.
    ///
    /// # Errors
    /// * Validation errors (`InvalidDiskCount`, `InvalidPeg`,
    ///   `InvalidConfiguration`) before any search state is built.
    /// * `NodeLimitExceeded` if the configured expansion budget runs out.
    /// * `SearchExhausted` if the frontier empties without reaching the goal,
    ///   which only happens when the move generator or deduplication is broken.
    pub fn solve_observed(
        &self,
        config: &SearchConfig,
        observer: &mut impl SearchObserver,
    ) -> Result<Solution> {
        let (start, goal) = config.validate()?;
        debug!(
            strategy = %config.strategy,
            num_disks = config.num_disks,
            goal = %goal,
            start = %start,
            "starting search"
        );
        match config.strategy {
            Strategy::AStar => self.search(start, goal, config, AStarFrontier::new(), observer),
            Strategy::Bfs => self.search(start, goal, config, FifoFrontier::new(), observer),
        }
    }

    fn search<F: Frontier>(
        &self,
        start: Configuration,
        goal: Peg,
        config: &SearchConfig,
        mut frontier: F,
        observer: &mut impl SearchObserver,
    ) -> Result<Solution> {
        let eager = config.strategy.marks_on_generation();
        let mut arena = NodeArena::new();
        let mut explored: HashSet<Configuration> = HashSet::new();
        let mut stats = SearchStats::default();

        if eager {
            explored.insert(start.clone());
        }
        let h = self.heuristic.estimate(&start, goal);
        frontier.offer(SearchNode::root(start, h), &mut arena);
        stats.max_frontier = frontier.len();

        while let Some(id) = frontier.pop(&arena) {
            let node = &arena[id];
            if !eager && explored.contains(&node.configuration) {
                stats.stale_skips += 1;
                continue;
            }
            observer.selected(node);

            if node.configuration.is_solved_on(goal) {
                stats.nodes = arena.len();
                let (moves, stages) = reconstruct_path(&arena, id);
                info!(
                    strategy = %config.strategy,
                    moves = moves.len(),
                    expanded = stats.expanded,
                    generated = stats.generated,
                    "solved"
                );
                return Ok(Solution {
                    strategy: config.strategy,
                    goal,
                    moves,
                    stages,
                    stats,
                });
            }

            if let Some(limit) = config.node_limit {
                if stats.expanded >= limit {
                    warn!(limit, "node limit reached before the goal");
                    return Err(Error::NodeLimitExceeded {
                        limit,
                        expanded: stats.expanded,
                    });
                }
            }

            trace!(g = node.g, h = node.h, f = node.f(), "expanding {}", node.configuration);
            stats.expanded += 1;
            if !eager {
                explored.insert(node.configuration.clone());
            }

            let mut successors = Vec::new();
            for mv in self.generator.generate_moves(&node.configuration) {
                let next = node.configuration.apply(mv);
                stats.generated += 1;
                let fresh = if eager {
                    explored.insert(next.clone())
                } else {
                    !explored.contains(&next)
                };
                if !fresh {
                    stats.already_explored += 1;
                    continue;
                }
                let h = self.heuristic.estimate(&next, goal);
                successors.push(SearchNode::child(id, node, mv, next, h));
            }

            for successor in successors {
                if frontier.offer(successor, &mut arena).is_none() {
                    stats.rejected += 1;
                }
            }
            stats.max_frontier = stats.max_frontier.max(frontier.len());
        }

        error!(
            strategy = %config.strategy,
            expanded = stats.expanded,
            "frontier exhausted without reaching the goal"
        );
        Err(Error::SearchExhausted {
            expanded: stats.expanded,
        })
    }
}

/// Solves `config` with the standard move rules and heuristic.
pub fn solve(config: &SearchConfig) -> Result<Solution> {
    Solver::new().solve(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    // Shadows the proptest prelude's `Strategy` trait.
    use super::Strategy;
    use crate::heuristics::{disks_off_goal, ZeroHeuristic};
    use crate::recursive::{canonical_moves, minimal_move_count};
    use proptest::prelude::*;

    const STRATEGIES: [Strategy; 2] = [Strategy::AStar, Strategy::Bfs];

    struct NoMoves;

    impl MoveGenerator for NoMoves {
        fn generate_moves(&self, _configuration: &Configuration) -> Vec<Move> {
            Vec::new()
        }
    }

    #[derive(Default)]
    struct Selected {
        priorities: Vec<u32>,
        configurations: Vec<Configuration>,
    }

    impl SearchObserver for Selected {
        fn selected(&mut self, node: &SearchNode) {
            self.priorities.push(node.f());
            self.configurations.push(node.configuration.clone());
        }
    }

    /// Replays `solution` from its start and checks every stage it reports.
    fn assert_valid_solution(solution: &Solution) {
        let stages = solution.start().replay(&solution.moves).unwrap();
        assert_eq!(stages, solution.stages);
        for stage in &stages {
            // Conservation: every stage still holds exactly the disks 1..=N.
            assert!(Configuration::from_pegs(stage.pegs().clone()).is_ok(), "{stage}");
        }
        assert!(solution.final_configuration().is_solved_on(solution.goal));
    }

    #[test]
    fn test_single_disk() {
        for strategy in STRATEGIES {
            let solution = solve(&SearchConfig::new(1, 2).with_strategy(strategy)).unwrap();
            assert_eq!(solution.moves, vec![Move::new(1, Peg::A, Peg::C)]);
            assert_eq!(solution.stages.len(), 2);
            assert_eq!(solution.strategy, strategy);
        }
    }

    #[test]
    fn test_three_disks_to_peg_c() {
        for strategy in STRATEGIES {
            let solution = solve(&SearchConfig::new(3, 2).with_strategy(strategy)).unwrap();
            assert_eq!(solution.move_count(), 7);
            assert_eq!(solution.stages[0], Configuration::initial(3, Peg::A));
            assert_eq!(solution.stages[7], Configuration::initial(3, Peg::C));
            assert_valid_solution(&solution);
        }
    }

    #[test]
    fn test_minimal_move_count_matches_oracle() {
        for n in 1..=7usize {
            for goal in [1usize, 2] {
                for strategy in STRATEGIES {
                    let solution =
                        solve(&SearchConfig::new(n, goal).with_strategy(strategy)).unwrap();
                    assert_eq!(solution.move_count() as u64, minimal_move_count(n));
                    let goal_peg = Peg::from_index(goal).unwrap();
                    assert_eq!(
                        solution.move_count(),
                        canonical_moves(n, Peg::A, goal_peg).len()
                    );
                    assert_valid_solution(&solution);
                }
            }
        }
    }

    #[test]
    fn test_goal_equal_to_start_is_trivial() {
        for n in [1usize, 4] {
            for strategy in STRATEGIES {
                let solution = solve(&SearchConfig::new(n, 0).with_strategy(strategy)).unwrap();
                assert_eq!(solution.move_count(), 0);
                assert_eq!(solution.stages, vec![Configuration::initial(n, Peg::A)]);
                assert_eq!(solution.stats.expanded, 0);
            }
        }
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert_eq!(
            solve(&SearchConfig::new(0, 2)).unwrap_err(),
            Error::InvalidDiskCount {
                num_disks: 0,
                max: MAX_DISKS
            }
        );
        assert!(matches!(
            solve(&SearchConfig::new(MAX_DISKS + 1, 2)),
            Err(Error::InvalidDiskCount { .. })
        ));
        assert_eq!(
            solve(&SearchConfig::new(3, 3)).unwrap_err(),
            Error::InvalidPeg { index: 3 }
        );
        let mismatched = SearchConfig::new(4, 2).with_start(Configuration::initial(3, Peg::A));
        assert!(matches!(
            solve(&mismatched),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_broken_generator_reports_internal_error() {
        let solver = Solver::with_parts(NoMoves, DisksOffGoal);
        for strategy in STRATEGIES {
            let err = solver
                .solve(&SearchConfig::new(3, 2).with_strategy(strategy))
                .unwrap_err();
            assert_eq!(err, Error::SearchExhausted { expanded: 1 });
            assert!(err.is_internal());
        }
    }

    #[test]
    fn test_broken_generator_still_accepts_solved_start() {
        let solver = Solver::with_parts(NoMoves, DisksOffGoal);
        let solution = solver.solve(&SearchConfig::new(3, 0)).unwrap();
        assert!(solution.moves.is_empty());
    }

    #[test]
    fn test_node_limit() {
        for strategy in STRATEGIES {
            let config = SearchConfig::new(6, 2)
                .with_strategy(strategy)
                .with_node_limit(5);
            assert_eq!(
                solve(&config).unwrap_err(),
                Error::NodeLimitExceeded {
                    limit: 5,
                    expanded: 5
                }
            );
        }
        // A generous limit does not get in the way.
        let config = SearchConfig::new(4, 1).with_node_limit(1_000);
        assert_eq!(solve(&config).unwrap().move_count(), 15);
    }

    #[test]
    fn test_astar_priorities_never_decrease() {
        for n in 1..=7usize {
            let mut observer = Selected::default();
            let solution = Solver::new()
                .solve_observed(&SearchConfig::new(n, 2), &mut observer)
                .unwrap();
            assert!(
                observer.priorities.windows(2).all(|w| w[0] <= w[1]),
                "{:?}",
                observer.priorities
            );
            assert_eq!(
                *observer.priorities.last().unwrap() as usize,
                solution.move_count()
            );
        }
    }

    #[test]
    fn test_each_configuration_is_expanded_once() {
        for strategy in STRATEGIES {
            let mut observer = Selected::default();
            let solution = Solver::new()
                .solve_observed(
                    &SearchConfig::new(5, 1).with_strategy(strategy),
                    &mut observer,
                )
                .unwrap();
            let distinct: HashSet<&Configuration> = observer.configurations.iter().collect();
            assert_eq!(distinct.len(), observer.configurations.len());
            assert_eq!(
                observer.configurations.last(),
                Some(solution.final_configuration())
            );
        }
    }

    #[test]
    fn test_bfs_never_queues_duplicates() {
        let solution = solve(&SearchConfig::new(5, 2).with_strategy(Strategy::Bfs)).unwrap();
        assert_eq!(solution.stats.stale_skips, 0);
        assert_eq!(solution.stats.rejected, 0);
        // Every arena node except the root was a fresh successor.
        assert_eq!(
            solution.stats.nodes,
            solution.stats.generated - solution.stats.already_explored + 1
        );
        // At most 3^N configurations exist.
        assert!(solution.stats.nodes <= 243);
    }

    #[test]
    fn test_stats_are_consistent() {
        let solution = solve(&SearchConfig::new(6, 2)).unwrap();
        let stats = solution.stats;
        assert!(stats.expanded > 0);
        assert!(stats.generated >= stats.already_explored + stats.rejected);
        assert_eq!(
            stats.nodes,
            stats.generated - stats.already_explored - stats.rejected + 1
        );
        assert!(stats.max_frontier >= 1);
    }

    #[test]
    fn test_zero_heuristic_finds_same_length() {
        let uniform = Solver::with_parts(StandardMoves, ZeroHeuristic);
        for n in 1..=5usize {
            let solution = uniform.solve(&SearchConfig::new(n, 2)).unwrap();
            assert_eq!(solution.move_count() as u64, minimal_move_count(n));
        }
    }

    #[test]
    fn test_search_from_custom_start() {
        // A:[3] B:[2, 1] C:[] needs disk 3 to C, then the pair from B onto it.
        let start = Configuration::from_pegs([vec![3], vec![2, 1], vec![]]).unwrap();
        for strategy in STRATEGIES {
            let config = SearchConfig::new(3, 2)
                .with_strategy(strategy)
                .with_start(start.clone());
            let solution = solve(&config).unwrap();
            assert_eq!(solution.move_count(), 4);
            assert_eq!(solution.start(), &start);
            assert_valid_solution(&solution);
        }
    }

    #[test]
    fn test_reconstruct_path_of_root() {
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root(Configuration::initial(2, Peg::A), 2));
        let (moves, stages) = reconstruct_path(&arena, root);
        assert!(moves.is_empty());
        assert_eq!(stages, vec![Configuration::initial(2, Peg::A)]);
    }

    #[test]
    fn test_strategy_parsing_and_display() {
        assert_eq!("astar".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!("A*".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!(" BFS ".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert!(matches!(
            "dfs".parse::<Strategy>(),
            Err(Error::UnknownStrategy { .. })
        ));
        assert_eq!(Strategy::AStar.to_string(), "A*");
        assert_eq!(Strategy::Bfs.to_string(), "BFS");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_random_starts_solve_optimally(num_disks in 1usize..=6, seed in any::<u64>(), goal in 0usize..3) {
            let start = Configuration::random_with_seed(num_disks, seed);
            let base = SearchConfig::new(num_disks, goal).with_start(start.clone());

            let astar = solve(&base.clone().with_strategy(Strategy::AStar)).unwrap();
            let bfs = solve(&base.with_strategy(Strategy::Bfs)).unwrap();
            assert_valid_solution(&astar);
            assert_valid_solution(&bfs);
            prop_assert_eq!(astar.move_count(), bfs.move_count());

            // BFS length is the true distance, so the heuristic must not exceed it.
            let goal_peg = Peg::from_index(goal).unwrap();
            prop_assert!(disks_off_goal(&start, goal_peg) as usize <= bfs.move_count());
            prop_assert!(bfs.move_count() as u64 <= minimal_move_count(num_disks));
        }
    }
}
