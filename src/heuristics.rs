use crate::engine::{Configuration, Peg};

/// Estimate of the moves still needed to bring a configuration to the goal peg.
///
/// Implementations used with A* must be admissible (never overestimate).
pub trait Heuristic {
    fn estimate(&self, configuration: &Configuration, goal: Peg) -> u32;
}

/// Counts the disks that are not currently resting on the goal peg.
///
/// Every such disk has to move at least once, and this charges one unit per
/// disk, so the estimate is admissible. A single move changes the count by at
/// most one, which also makes it consistent under unit move costs.
///
/// # Arguments
/// * `configuration`: The configuration to evaluate.
/// * `goal`: The peg every disk must end up on.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Configuration, Peg};
/// use hanoi_solver::heuristics::disks_off_goal;
/// let start = Configuration::initial(3, Peg::A);
/// assert_eq!(disks_off_goal(&start, Peg::C), 3);
/// assert_eq!(disks_off_goal(&start, Peg::A), 0);
/// ```
pub fn disks_off_goal(configuration: &Configuration, goal: Peg) -> u32 {
    (configuration.num_disks() - configuration.peg(goal).len()) as u32
}

/// The default A* heuristic; see [`disks_off_goal`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DisksOffGoal;

impl Heuristic for DisksOffGoal {
    fn estimate(&self, configuration: &Configuration, goal: Peg) -> u32 {
        disks_off_goal(configuration, goal)
    }
}

/// Always estimates zero, turning A* into a uniform-cost search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _configuration: &Configuration, _goal: Peg) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Move;

    #[test]
    fn test_disks_off_goal_counts() {
        let conf = Configuration::from_pegs([vec![4], vec![3, 1], vec![2]]).unwrap();
        assert_eq!(disks_off_goal(&conf, Peg::A), 3);
        assert_eq!(disks_off_goal(&conf, Peg::B), 2);
        assert_eq!(disks_off_goal(&conf, Peg::C), 3);
    }

    #[test]
    fn test_goal_configuration_scores_zero() {
        let solved = Configuration::initial(5, Peg::C);
        assert_eq!(DisksOffGoal.estimate(&solved, Peg::C), 0);
    }

    #[test]
    fn test_single_move_changes_estimate_by_at_most_one() {
        for seed in 0..50 {
            let conf = Configuration::random_with_seed(6, seed);
            for goal in Peg::ALL {
                let before = disks_off_goal(&conf, goal) as i64;
                for mv in conf.legal_moves() {
                    let after = disks_off_goal(&conf.apply(mv), goal) as i64;
                    assert!((before - after).abs() <= 1, "{conf} {mv}");
                }
            }
        }
    }

    #[test]
    fn test_estimate_never_exceeds_canonical_length_from_start() {
        // From the initial stack the optimum is 2^N - 1, which is at least N.
        for n in 1..=8usize {
            let start = Configuration::initial(n, Peg::A);
            let optimum = (1u64 << n) - 1;
            assert!(u64::from(DisksOffGoal.estimate(&start, Peg::B)) <= optimum);
        }
    }

    #[test]
    fn test_zero_heuristic() {
        let conf = Configuration::initial(3, Peg::A).apply(Move::new(1, Peg::A, Peg::B));
        assert_eq!(ZeroHeuristic.estimate(&conf, Peg::C), 0);
    }
}
