//! Core puzzle model for the three-peg Tower of Hanoi.
//!
//! This module defines the pieces the search machinery works with:
//! - `Peg`: one of the three disk holders.
//! - `Move`: a single-disk transfer between two pegs.
//! - `Configuration`: the arrangement of every disk across the pegs. Equality and
//!   hashing are structural, so independently built configurations with the same
//!   contents are interchangeable as explored-set keys.
//! - `MoveGenerator`: enumerates the moves available from a configuration.
//!   `StandardMoves` applies the puzzle's legality rule.
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Size rank of a disk, `1` being the smallest.
pub type Disk = u32;

/// Number of pegs in the puzzle.
pub const PEG_COUNT: usize = 3;

/// Largest supported disk count. Keeps `2^N - 1` inside a `u64` and every
/// path cost inside a `u32`; the reachable state space (`3^N`) bounds the
/// practical value far below this anyway.
pub const MAX_DISKS: usize = 32;

/// One of the three pegs. Index 0 (`A`) is the conventional start peg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Peg {
    A,
    B,
    C,
}

impl Peg {
    /// All pegs in index order.
    pub const ALL: [Peg; PEG_COUNT] = [Peg::A, Peg::B, Peg::C];

    /// Converts a 0-based peg index into a `Peg`.
    ///
    /// # Examples
    /// ```
    /// use hanoi_solver::engine::Peg;
    /// assert_eq!(Peg::from_index(2).unwrap(), Peg::C);
    /// assert!(Peg::from_index(3).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Peg> {
        Peg::ALL
            .get(index)
            .copied()
            .ok_or(Error::InvalidPeg { index })
    }

    /// Returns the 0-based index of this peg.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn to_char(self) -> char {
        match self {
            Peg::A => 'A',
            Peg::B => 'B',
            Peg::C => 'C',
        }
    }

    /// Returns the third peg, the one that is neither `self` nor `other`.
    ///
    /// # Panics
    /// Panics if `self == other`.
    pub fn spare(self, other: Peg) -> Peg {
        assert_ne!(self, other, "spare peg is undefined for identical pegs");
        Peg::ALL[PEG_COUNT * (PEG_COUNT - 1) / 2 - self.index() - other.index()]
    }
}

impl TryFrom<usize> for Peg {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Peg::from_index(index)
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single-disk transfer from the top of one peg to the top of another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub disk: Disk,
    pub from: Peg,
    pub to: Peg,
}

impl Move {
    pub fn new(disk: Disk, from: Peg, to: Peg) -> Self {
        Move { disk, from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "disk {} from {} to {}", self.disk, self.from, self.to)
    }
}

/// The full arrangement of disks across the three pegs.
///
/// Each peg is stored bottom-first, so disk sizes strictly decrease toward the
/// end of the vector and the last element is the peg's top (smallest) disk.
/// Every disk `1..=N` appears exactly once across the three pegs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    pegs: [Vec<Disk>; PEG_COUNT],
}

impl Configuration {
    /// Creates the configuration with all `num_disks` disks stacked on `peg`,
    /// largest at the bottom.
    ///
    /// # Examples
    /// ```
    /// use hanoi_solver::engine::{Configuration, Peg};
    /// let start = Configuration::initial(3, Peg::A);
    /// assert_eq!(start.peg(Peg::A), &[3, 2, 1]);
    /// assert_eq!(start.to_string(), "A:[3, 2, 1] B:[] C:[]");
    /// ```
    pub fn initial(num_disks: usize, peg: Peg) -> Self {
        let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
        pegs[peg.index()] = (1..=num_disks as Disk).rev().collect();
        Configuration { pegs }
    }

    /// Builds a configuration from explicit peg contents (bottom-first),
    /// checking that every peg is stacked largest-first and that the disks are
    /// exactly `1..=N` with no duplicates.
    pub fn from_pegs(pegs: [Vec<Disk>; PEG_COUNT]) -> Result<Self> {
        let num_disks: usize = pegs.iter().map(Vec::len).sum();
        if num_disks == 0 || num_disks > MAX_DISKS {
            return Err(Error::InvalidDiskCount {
                num_disks,
                max: MAX_DISKS,
            });
        }

        let mut seen = vec![false; num_disks + 1];
        for (peg, disks) in Peg::ALL.iter().zip(pegs.iter()) {
            for &disk in disks {
                let slot = disk as usize;
                if slot == 0 || slot > num_disks {
                    return Err(Error::invalid_configuration(format!(
                        "disk {disk} on peg {peg} is outside 1..={num_disks}"
                    )));
                }
                if seen[slot] {
                    return Err(Error::invalid_configuration(format!(
                        "disk {disk} appears more than once"
                    )));
                }
                seen[slot] = true;
            }
            if let Some(pair) = disks.windows(2).find(|pair| pair[0] <= pair[1]) {
                return Err(Error::invalid_configuration(format!(
                    "disk {} rests on smaller disk {} on peg {peg}",
                    pair[1], pair[0]
                )));
            }
        }

        Ok(Configuration { pegs })
    }

    /// Places each of `num_disks` disks on a uniformly random peg.
    ///
    /// Disks are dealt largest first, so the result always satisfies the
    /// stacking rule and every one of the `3^N` configurations is equally likely.
    pub fn random<R: Rng>(num_disks: usize, rng: &mut R) -> Self {
        let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
        for disk in (1..=num_disks as Disk).rev() {
            pegs[rng.gen_range(0..PEG_COUNT)].push(disk);
        }
        Configuration { pegs }
    }

    /// Same as [`Configuration::random`] but reproducible for a given `seed`.
    pub fn random_with_seed(num_disks: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::random(num_disks, &mut rng)
    }

    /// Total number of disks in the puzzle.
    pub fn num_disks(&self) -> usize {
        self.pegs.iter().map(Vec::len).sum()
    }

    /// Disks on `peg`, bottom first.
    pub fn peg(&self, peg: Peg) -> &[Disk] {
        &self.pegs[peg.index()]
    }

    pub fn pegs(&self) -> &[Vec<Disk>; PEG_COUNT] {
        &self.pegs
    }

    /// The smallest disk on `peg`, or `None` if the peg is empty.
    pub fn top(&self, peg: Peg) -> Option<Disk> {
        self.pegs[peg.index()].last().copied()
    }

    /// Returns `true` if every disk rests on `goal`.
    pub fn is_solved_on(&self, goal: Peg) -> bool {
        self.pegs[goal.index()].len() == self.num_disks()
    }

    /// Returns the move of the top disk of `from` onto `to`, if it is legal.
    pub fn legal_move(&self, from: Peg, to: Peg) -> Option<Move> {
        if from == to {
            return None;
        }
        let disk = self.top(from)?;
        match self.top(to) {
            Some(below) if below < disk => None,
            _ => Some(Move::new(disk, from, to)),
        }
    }

    /// Checks `mv` against the current pegs: the moved disk must be the top of
    /// the source peg and may only land on an empty peg or a larger disk.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_move(mv.from, mv.to) == Some(mv)
    }

    /// Enumerates every legal move. At most one move per ordered pair of
    /// distinct pegs is possible, so the result holds at most 6 moves (in
    /// practice 2 or 3).
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(PEG_COUNT);
        for from in Peg::ALL {
            for to in Peg::ALL {
                if let Some(mv) = self.legal_move(from, to) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// Returns the configuration reached by applying `mv`.
    ///
    /// # Panics
    /// Panics if `mv` is not legal here. Callers are expected to apply only
    /// moves produced by a move generator; use [`Configuration::try_apply`]
    /// for untrusted input.
    pub fn apply(&self, mv: Move) -> Configuration {
        assert!(self.is_legal(mv), "illegal move ({mv}) applied to {self}");
        let mut next = self.clone();
        next.pegs[mv.from.index()].pop();
        next.pegs[mv.to.index()].push(mv.disk);
        next
    }

    /// Checked variant of [`Configuration::apply`].
    pub fn try_apply(&self, mv: Move) -> Result<Configuration> {
        if !self.is_legal(mv) {
            return Err(Error::IllegalMove {
                disk: mv.disk,
                from: mv.from,
                to: mv.to,
            });
        }
        Ok(self.apply(mv))
    }

    /// Applies `moves` in order and returns every stage, starting with `self`.
    ///
    /// # Examples
    /// ```
    /// use hanoi_solver::engine::{Configuration, Move, Peg};
    /// let start = Configuration::initial(1, Peg::A);
    /// let stages = start.replay(&[Move::new(1, Peg::A, Peg::C)]).unwrap();
    /// assert_eq!(stages.len(), 2);
    /// assert!(stages[1].is_solved_on(Peg::C));
    /// ```
    pub fn replay(&self, moves: &[Move]) -> Result<Vec<Configuration>> {
        let mut stages = Vec::with_capacity(moves.len() + 1);
        stages.push(self.clone());
        for &mv in moves {
            let next = stages[stages.len() - 1].try_apply(mv)?;
            stages.push(next);
        }
        Ok(stages)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, peg) in Peg::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{:?}", peg, self.pegs[peg.index()])?;
        }
        Ok(())
    }
}

/// Source of successor moves for the search driver.
pub trait MoveGenerator {
    fn generate_moves(&self, configuration: &Configuration) -> Vec<Move>;
}

/// Move generator that follows the puzzle rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMoves;

impl MoveGenerator for StandardMoves {
    fn generate_moves(&self, configuration: &Configuration) -> Vec<Move> {
        configuration.legal_moves()
    }
}
