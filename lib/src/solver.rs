use std::collections::HashSet;

use crate::board::{Board, Signature, SlideError};
use crate::moves::Move;

/// Backtracking searcher over the configurations of one [`Board`].
///
/// The search mutates the board in place, trying each legal move and
/// reverting it after the branch is explored, so a solver borrows its board
/// exclusively for the whole solve. Configurations already visited — by the
/// board's own equality, which ignores which penguin or bear is which — are
/// pruned; without that, symmetric move orders revisit the same states and
/// the search blows up exponentially.
///
/// A solver is single-use: build it with [`From`], call [`Solver::solve`].
/// Independent boards can be solved concurrently only by giving each its own
/// solver; nothing is shared between instances.
pub struct Solver<'a> {
    board: &'a mut Board,
    seen: HashSet<Signature>,
    path: Vec<Move>,
    best: Option<Vec<Move>>,
}

impl<'a> From<&'a mut Board> for Solver<'a> {
    fn from(board: &'a mut Board) -> Self {
        Self {
            board,
            seen: HashSet::new(),
            path: Vec::new(),
            best: None,
        }
    }
}

impl Solver<'_> {
    /// Search depth-first for the shortest reachable solution.
    ///
    /// At every node the legal moves are tried in enumeration order: apply,
    /// descend, revert. A branch is cut as soon as it lands on an
    /// already-seen configuration, or once it is too deep to beat the best
    /// solution found so far. Every move is reverted on the way back out,
    /// wins included, so the board is in its starting configuration again
    /// when this returns; replay the returned moves with
    /// [`Board::slide`] to act the solution out.
    ///
    /// Returns an empty list when no sequence of moves wins — an unsolvable
    /// board is a normal outcome, not an error. [`SlideError`] can only
    /// escape if a move the board itself enumerated fails to apply, which
    /// would mean the legality scan and the slide disagree.
    pub fn solve(mut self) -> Result<Vec<Move>, SlideError> {
        self.seen.insert(self.board.signature());
        self.search()?;
        Ok(self.best.unwrap_or_default())
    }

    fn search(&mut self) -> Result<(), SlideError> {
        for candidate in self.board.all_moves() {
            let previous = self.board.slide(candidate.entity, candidate.direction)?;
            self.path.push(candidate);
            let configuration = self.board.signature();
            if self.seen.insert(configuration) {
                if self.board.is_won() {
                    if self.best.as_ref().map_or(true, |best| self.path.len() < best.len()) {
                        self.best = Some(self.path.clone());
                    }
                } else if self.best.as_ref().map_or(true, |best| self.path.len() + 1 < best.len()) {
                    // one level deeper can still produce something shorter
                    self.search()?;
                }
            }
            self.path.pop();
            self.board.restore(candidate.entity, previous);
        }
        Ok(())
    }
}
