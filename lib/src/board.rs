use std::error::Error;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::direction::Direction;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::location::{Dimension, Location};

/// Reasons a placement is rejected. The board is left untouched on rejection.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlacementError {
    /// The requested cell lies outside the board.
    OutOfBounds {
        /// The rejected cell.
        location: Location,
    },
    /// The requested cell already holds an entity.
    Occupied {
        /// The rejected cell.
        location: Location,
    },
}

impl Display for PlacementError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { location } => write!(
                f,
                "cannot place an entity at ({}, {}): outside the board",
                location.0, location.1
            ),
            Self::Occupied { location } => write!(
                f,
                "cannot place an entity at ({}, {}): the cell is already occupied",
                location.0, location.1
            ),
        }
    }
}

impl Error for PlacementError {}

/// Reasons a slide is refused. Either one means the caller skipped the
/// legality check, so the board refuses loudly instead of clamping.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SlideError {
    /// The entity has dived and is no longer on the board.
    Vacant {
        /// The off-board entity.
        entity: EntityId,
    },
    /// No blocker lies in the given direction, so the slide would leave the
    /// grid instead of stopping.
    NoBlocker {
        /// The entity that was asked to slide.
        entity: EntityId,
        /// The direction with no blocker in it.
        direction: Direction,
    },
}

impl Display for SlideError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vacant { entity } => {
                write!(f, "cannot slide entity {}: it is no longer on the board", entity.0)
            }
            Self::NoBlocker { entity, direction } => {
                write!(f, "cannot slide entity {} {direction}: no blocker ahead of it", entity.0)
            }
        }
    }
}

impl Error for SlideError {}

/// Canonical hashable form of a configuration: the on-board entities as a
/// sorted list of `(location, kind)` pairs. Two boards of equal dimensions
/// compare equal exactly when their signatures match.
pub(crate) type Signature = Vec<(Location, EntityKind)>;

/// How many of each kind stand on one cell.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
struct Census {
    penguins: u8,
    bears: u8,
    waters: u8,
}

/// A Penguins puzzle: a fixed-size sheet of ice plus every entity placed on
/// it. The board is the single source of truth for occupancy.
///
/// Entities keep their placement order for the life of the board, which
/// makes move enumeration deterministic; a dived penguin keeps its slot with
/// its location cleared so a revert can put it back exactly where it was.
#[derive(Clone, Debug)]
pub struct Board {
    dims: (Dimension, Dimension),
    entities: Vec<Entity>,
}

impl Board {
    /// An empty board with the given `(width, height)`.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            entities: Vec::new(),
        }
    }

    /// The `(width, height)` this board was built with.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Place a new entity and return its handle.
    ///
    /// Rejects cells outside the board and cells that already hold an
    /// entity. Identifiers are assigned here, one per placement, so two
    /// entities can never share one.
    pub fn place(&mut self, kind: EntityKind, location: Location) -> Result<EntityId, PlacementError> {
        if !self.in_bounds(location) {
            return Err(PlacementError::OutOfBounds { location });
        }
        if self.entities_at(location).next().is_some() {
            return Err(PlacementError::Occupied { location });
        }
        // dived penguins keep their tag, so count every record of the kind
        let tag = self.entities.iter().filter(|entity| entity.kind == kind).count() + 1;
        self.entities.push(Entity {
            kind,
            tag,
            location: Some(location),
        });
        Ok(EntityId(self.entities.len() - 1))
    }

    /// The entity behind a handle, if the handle belongs to this board.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Every entity ever placed, in placement order, paired with its handle.
    /// Dived penguins are included, with their location cleared.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().enumerate().map(|(index, entity)| (EntityId(index), entity))
    }

    /// All entities of one kind still on the board, in placement order.
    pub fn entities_of(&self, kind: EntityKind) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.kind == kind && entity.location.is_some())
    }

    /// Every entity currently standing on `location`.
    pub fn entities_at(&self, location: Location) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.location == Some(location))
    }

    /// Where an entity currently stands; [`None`] once it has dived.
    pub fn location_of(&self, id: EntityId) -> Option<Location> {
        self.entity(id).and_then(Entity::location)
    }

    /// Whether `location` lies on the board.
    pub fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.dims.0.get() && location.1 < self.dims.1.get()
    }

    /// Whether any entity on `location` stops a slide.
    pub fn has_blocker_at(&self, location: Location) -> bool {
        self.entities_at(location).any(|entity| entity.kind.blocks())
    }

    /// Whether the puzzle is won: no penguin left on the ice.
    pub fn is_won(&self) -> bool {
        self.entities_of(EntityKind::Penguin).next().is_none()
    }

    /// Slide an entity until the next cell in `direction` holds a blocker,
    /// returning its location before the move so the caller can revert.
    ///
    /// A penguin that stops on a water cell dives and leaves the board; a
    /// bear stopping there simply stays, the one lasting co-occupancy.
    /// Meeting the board edge without having met a blocker means the move
    /// was never legal to request and fails without touching the board.
    pub fn slide(&mut self, id: EntityId, direction: Direction) -> Result<Location, SlideError> {
        let start = self.location_of(id).ok_or(SlideError::Vacant { entity: id })?;
        let mut stop = start;
        loop {
            let next = direction.attempt_from(stop);
            if !self.in_bounds(next) {
                return Err(SlideError::NoBlocker { entity: id, direction });
            }
            if self.has_blocker_at(next) {
                break;
            }
            stop = next;
        }
        let dives = self.entities[id.0].kind == EntityKind::Penguin
            && self.entities_at(stop).any(|entity| entity.kind == EntityKind::Water);
        self.entities[id.0].location = if dives { None } else { Some(stop) };
        Ok(start)
    }

    /// Exact inverse of [`Board::slide`]: put the entity back on `location`,
    /// re-surfacing it if it had dived.
    pub(crate) fn restore(&mut self, id: EntityId, location: Location) {
        self.entities[id.0].location = Some(location);
    }

    pub(crate) fn signature(&self) -> Signature {
        self.entities
            .iter()
            .filter_map(|entity| entity.location.map(|location| (location, entity.kind)))
            .sorted()
            .collect_vec()
    }

    fn census(&self) -> Array2<Census> {
        let mut cells = Array2::from_elem((self.dims.1.get(), self.dims.0.get()), Census::default());
        for entity in &self.entities {
            let Some(location) = entity.location else {
                continue;
            };
            let cell = &mut cells[location.as_index()];
            match entity.kind {
                EntityKind::Penguin => cell.penguins += 1,
                EntityKind::Bear => cell.bears += 1,
                EntityKind::Water => cell.waters += 1,
            }
        }
        cells
    }
}

impl PartialEq for Board {
    // same dimensions and, cell by cell, the same multiset of kinds; which
    // penguin or bear is which does not matter
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.census() == other.census()
    }
}

impl Eq for Board {}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut cells = Array2::from_elem((self.dims.1.get(), self.dims.0.get()), '.');
        // waters first, so an animal resting on a hole renders as the animal
        let by_layer = self
            .entities
            .iter()
            .filter(|entity| !entity.kind.blocks())
            .chain(self.entities.iter().filter(|entity| entity.kind.blocks()));
        for entity in by_layer {
            if let Some(location) = entity.location {
                cells[location.as_index()] = entity.kind.glyph();
            }
        }
        for row in cells.rows() {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
