//! Piece shapes: cell masks, quarter-turn rotation and derived extents.

use std::fmt;

/// Direction of a move or rotation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
        };
        f.write_str(name)
    }
}

/// The seven piece kinds. Each one owns a square template mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O,
    T,
    L,
    J,
    I,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [Self::O, Self::T, Self::L, Self::J, Self::I, Self::S, Self::Z];

    /// Template cells, row-major inside the kind's bounding box.
    #[rustfmt::skip]
    pub fn template(self) -> &'static [u8] {
        match self {
            Self::O => &[
                1, 1,
                1, 1,
            ],
            Self::T => &[
                1, 1, 1,
                0, 1, 0,
                0, 0, 0,
            ],
            Self::L => &[
                1, 1, 1,
                1, 0, 0,
                0, 0, 0,
            ],
            Self::J => &[
                1, 1, 1,
                0, 0, 1,
                0, 0, 0,
            ],
            Self::I => &[
                0, 0, 0, 0,
                1, 1, 1, 1,
                0, 0, 0, 0,
                0, 0, 0, 0,
            ],
            Self::S => &[
                0, 1, 1,
                1, 1, 0,
                0, 0, 0,
            ],
            Self::Z => &[
                1, 1, 0,
                0, 1, 1,
                0, 0, 0,
            ],
        }
    }

    /// Fresh copy of the template.
    pub fn mask(self) -> Mask {
        Mask::from_bits(self.template())
    }
}

/// Square occupancy mask of a piece; index = row * side + column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    cells: Vec<bool>,
}

impl Mask {
    pub fn from_bits(bits: &[u8]) -> Self {
        Self {
            cells: bits.iter().map(|&b| b != 0).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Side of the square box, or `None` if the length is not a perfect square.
    pub fn side(&self) -> Option<usize> {
        let side = self.cells.len().isqrt();
        (side * side == self.cells.len()).then_some(side)
    }

    #[inline]
    pub fn is_filled(&self, index: usize) -> bool {
        self.cells.get(index).copied().unwrap_or(false)
    }

    /// Local `(column, row)` of every occupied cell.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let side = self.cells.len().isqrt().max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(i, _)| (i % side, i / side))
    }
}

/// Rotate a mask a quarter turn: `Right` is clockwise, `Left` counter-clockwise.
/// `Down` and non-square masks come back unchanged.
pub fn rotate(mask: &Mask, direction: Direction) -> Mask {
    let Some(n) = mask.side() else {
        return mask.clone();
    };
    let src = &mask.cells;
    let mut cells = vec![false; n * n];
    match direction {
        Direction::Left => {
            for i in 0..n {
                for j in 0..n {
                    cells[n * i + j] = src[n - 1 - i + j * n];
                }
            }
        }
        Direction::Right => {
            for i in 0..n {
                for j in 0..n {
                    cells[n * (i + 1) - (j + 1)] = src[i + n * j];
                }
            }
        }
        Direction::Down => return mask.clone(),
    }
    Mask { cells }
}

/// Extents of the occupied cells inside a mask's box.
///
/// An empty mask yields `min_x == min_y == box_size` and `max_x == max_y == 0`;
/// those values do not describe a real shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub box_size: i32,
    pub min_x: i32,
    pub max_x: i32,
    pub width: i32,
    /// Empty box columns right of the shape.
    pub right_gap: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub height: i32,
    pub bottom_gap: i32,
}

impl Geometry {
    pub fn of(mask: &Mask) -> Self {
        let box_size = mask.len().isqrt() as i32;
        let (mut min_x, mut max_x) = (box_size, 0);
        let (mut min_y, mut max_y) = (box_size, 0);
        for (col, row) in mask.filled_cells() {
            let (col, row) = (col as i32, row as i32);
            min_x = min_x.min(col);
            max_x = max_x.max(col);
            min_y = min_y.min(row);
            max_y = max_y.max(row);
        }
        let width = if max_x == min_x { 1 } else { max_x - min_x + 1 };
        let height = if max_y == min_y { 1 } else { max_y - min_y + 1 };
        Self {
            box_size,
            min_x,
            max_x,
            width,
            right_gap: box_size - width - min_x,
            min_y,
            max_y,
            height,
            bottom_gap: box_size - height - min_y,
        }
    }
}
