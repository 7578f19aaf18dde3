//! The descending piece: mask, position and the move/rotate transitions.

use crate::shape::{self, Direction, Geometry, Mask, ShapeKind};
use rand::Rng;

/// Grid coordinate of a piece box's top-left corner (or of its landing spot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Active piece. Geometry always matches the current mask.
#[derive(Debug, Clone)]
pub struct Piece {
    kind: ShapeKind,
    mask: Mask,
    geometry: Geometry,
    pub position: Position,
}

impl Piece {
    pub fn new(kind: ShapeKind) -> Self {
        let mask = kind.mask();
        let geometry = Geometry::of(&mask);
        Self {
            kind,
            mask,
            geometry,
            position: Position::default(),
        }
    }

    /// New piece of a uniformly chosen kind at (0, 0).
    pub fn spawn<R: Rng>(rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.random_range(0..ShapeKind::ALL.len())];
        Self::new(kind)
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Leftmost allowed x: the box may hang off the wall by its empty columns.
    pub fn left_limit(&self) -> i32 {
        -self.geometry.min_x
    }

    /// Rightmost allowed x for a pit `pit_width` columns wide.
    pub fn right_limit(&self, pit_width: i32) -> i32 {
        pit_width - self.geometry.box_size + self.geometry.right_gap
    }

    /// Quarter turn in place. `Down` is ignored. Position is left alone.
    pub fn rotate(&mut self, direction: Direction) {
        if direction == Direction::Down {
            return;
        }
        self.mask = shape::rotate(&self.mask, direction);
        self.geometry = Geometry::of(&self.mask);
    }

    /// One step: sideways moves clamp to the walls, `Down` is unconditional.
    pub fn shift(&mut self, direction: Direction, pit_width: i32) {
        let (left, right) = (self.left_limit(), self.right_limit(pit_width));
        let pos = &mut self.position;
        match direction {
            Direction::Left => pos.x = if pos.x > left { pos.x - 1 } else { left },
            Direction::Right => pos.x = if pos.x < right { pos.x + 1 } else { right },
            Direction::Down => pos.y += 1,
        }
    }

    /// Pull the box back inside the walls after an input command.
    ///
    /// The left side only snaps back for shapes touching their box's left edge
    /// (`min_x == 0`); other shapes are left where they are.
    pub fn pull_inside(&mut self, pit_width: i32) {
        let right = self.right_limit(pit_width);
        if self.position.x < 0 && self.geometry.min_x == 0 {
            self.position.x = 0;
        } else if self.position.x > right {
            self.position.x = right;
        }
    }

    /// Grid coordinates of the occupied cells with the box placed at `origin`.
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.mask
            .filled_cells()
            .map(move |(col, row)| (origin.x + col as i32, origin.y + row as i32))
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_at(self.position)
    }
}
