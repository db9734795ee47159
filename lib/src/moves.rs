use itertools::Itertools;
use strum::VariantArray;

use crate::board::Board;
use crate::direction::Direction;
use crate::entity::EntityId;

/// A single slide request: which entity, which way. Building one does not
/// apply it; hand it to [`Board::slide`] for that.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    /// The entity to slide.
    pub entity: EntityId,
    /// The direction to slide it in.
    pub direction: Direction,
}

impl Board {
    /// Whether sliding `id` toward `direction` is a real move.
    ///
    /// Scanning outward from the entity's own cell, the move is legal iff
    /// the first blocker in that direction is in bounds and not adjacent: an
    /// adjacent blocker gives a zero-length slide, and no blocker at all
    /// would send the entity off the ice. An entity that has dived has no
    /// legal moves.
    pub fn move_is_legal(&self, id: EntityId, direction: Direction) -> bool {
        let Some(start) = self.location_of(id) else {
            return false;
        };
        let mut probe = direction.attempt_from(start);
        let mut distance = 1;
        while self.in_bounds(probe) {
            if self.has_blocker_at(probe) {
                return distance > 1;
            }
            probe = direction.attempt_from(probe);
            distance += 1;
        }
        false
    }

    /// The legal moves of one entity, in direction order.
    pub fn moves_of(&self, id: EntityId) -> Vec<Move> {
        Direction::VARIANTS
            .iter()
            .filter(|direction| self.move_is_legal(id, **direction))
            .map(|direction| Move {
                entity: id,
                direction: *direction,
            })
            .collect_vec()
    }

    /// Every legal move on the board.
    ///
    /// Entities are visited in placement order (water never moves and is
    /// skipped) and directions in variant order, so the enumeration is
    /// deterministic run to run.
    pub fn all_moves(&self) -> Vec<Move> {
        self.entities()
            .filter(|(_, entity)| entity.kind().moves())
            .flat_map(|(id, _)| self.moves_of(id))
            .collect_vec()
    }
}
