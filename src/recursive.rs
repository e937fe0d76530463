//! Closed-form Tower of Hanoi solution.
//!
//! Produces the canonical minimal move sequence straight from the doubling
//! recurrence: move `N - 1` disks out of the way, move disk `N`, move the
//! `N - 1` disks back on top. No search is involved; the output serves as an
//! oracle for the search strategies.
use crate::engine::{Disk, Move, Peg};

/// Minimal number of moves for `num_disks` disks between two distinct pegs,
/// `2^N - 1`.
///
/// # Panics
/// Panics if `num_disks` exceeds 63.
pub fn minimal_move_count(num_disks: usize) -> u64 {
    assert!(num_disks < 64, "move count for {num_disks} disks overflows u64");
    (1u64 << num_disks) - 1
}

/// Canonical move sequence transferring a tower of `num_disks` disks from
/// `from` to `to`. Empty when `from == to`.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::{Move, Peg};
/// use hanoi_solver::recursive::canonical_moves;
/// let moves = canonical_moves(2, Peg::A, Peg::C);
/// assert_eq!(moves, vec![
///     Move::new(1, Peg::A, Peg::B),
///     Move::new(2, Peg::A, Peg::C),
///     Move::new(1, Peg::B, Peg::C),
/// ]);
/// ```
pub fn canonical_moves(num_disks: usize, from: Peg, to: Peg) -> Vec<Move> {
    let mut moves = Vec::new();
    if from != to {
        push_tower(num_disks as Disk, from, to, from.spare(to), &mut moves);
    }
    moves
}

fn push_tower(disk: Disk, from: Peg, to: Peg, via: Peg, moves: &mut Vec<Move>) {
    if disk == 0 {
        return;
    }
    push_tower(disk - 1, from, via, to, moves);
    moves.push(Move::new(disk, from, to));
    push_tower(disk - 1, via, to, from, moves);
}
