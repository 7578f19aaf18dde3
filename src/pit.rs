//! The pit: settled-block occupancy grid and layout file loading.

use std::path::Path;
use thiserror::Error;

pub const HORIZONTAL_BLOCKS: usize = 10;
pub const VERTICAL_BLOCKS: usize = 20;

/// Smallest pit side; the I piece needs a 4x4 box.
pub const MIN_PIT_SIDE: usize = 4;
pub const MAX_PIT_SIDE: usize = 256;

/// Starting layout: a two-wide tower on the right and some rubble at the bottom.
const INITIAL_LAYOUT: [&str; VERTICAL_BLOCKS] = [
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "..........",
    "........##",
    "........##",
    "........##",
    "........##",
    "....##.###",
    "....#...##",
    "...###.###",
];

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout has no rows")]
    Empty,
    #[error("line {line}: unexpected cell {found:?}")]
    InvalidCell { line: usize, found: char },
    #[error("line {line}: row is {found} cells wide, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("pit is {width}x{height}, sides must be {MIN_PIT_SIDE} to {MAX_PIT_SIDE} cells")]
    BadSize { width: usize, height: usize },
}

/// Settled blocks, row-major (index = row * width + column). Row 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pit {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Pit {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// The built-in starting layout (10x20).
    pub fn initial() -> Self {
        Self {
            width: HORIZONTAL_BLOCKS,
            height: VERTICAL_BLOCKS,
            cells: INITIAL_LAYOUT
                .iter()
                .flat_map(|row| row.bytes().map(|b| b == b'#'))
                .collect(),
        }
    }

    /// Load a layout file: one row per line, `.`/`0` empty, `#`/`1`/`x` filled.
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let s = std::fs::read_to_string(path)?;
        Self::parse(&s)
    }

    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;
        for (n, line) in s.lines().enumerate() {
            let line_no = n + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let mut row = Vec::with_capacity(width.unwrap_or(HORIZONTAL_BLOCKS));
            for ch in line.chars() {
                match ch {
                    '.' | '0' => row.push(false),
                    '#' | '1' | 'X' | 'x' => row.push(true),
                    ',' => {}
                    c if c.is_whitespace() => {}
                    c => {
                        return Err(LayoutError::InvalidCell {
                            line: line_no,
                            found: c,
                        });
                    }
                }
            }
            let expected = *width.get_or_insert(row.len());
            if row.len() != expected {
                return Err(LayoutError::Ragged {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            cells.extend(row);
            height += 1;
        }
        let Some(width) = width else {
            return Err(LayoutError::Empty);
        };
        let sides = MIN_PIT_SIDE..=MAX_PIT_SIDE;
        if !sides.contains(&width) || !sides.contains(&height) {
            return Err(LayoutError::BadSize { width, height });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Occupancy at a grid coordinate; anything outside the pit reads as empty.
    #[inline]
    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return false;
        }
        self.cells[row as usize * self.width + col as usize]
    }

    /// First occupied row in `col`, scanning from `from_row` down to the floor.
    pub fn first_occupied_row(&self, col: i32, from_row: i32) -> Option<i32> {
        if col < 0 || col as usize >= self.width {
            return None;
        }
        (from_row.max(0)..self.height as i32).find(|&row| self.is_occupied(col, row))
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(i, _)| ((i % self.width) as i32, (i / self.width) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_layout_dimensions() {
        let pit = Pit::initial();
        assert_eq!((pit.width(), pit.height()), (HORIZONTAL_BLOCKS, VERTICAL_BLOCKS));
        assert_eq!(pit.occupied_cells().count(), 22);
    }

    #[test]
    fn tower_top_is_row_13() {
        let pit = Pit::initial();
        assert_eq!(pit.first_occupied_row(8, 0), Some(13));
        assert_eq!(pit.first_occupied_row(9, 0), Some(13));
        assert_eq!(pit.first_occupied_row(0, 0), None);
        assert_eq!(pit.first_occupied_row(3, 0), Some(19));
        assert_eq!(pit.first_occupied_row(4, 0), Some(17));
    }

    #[test]
    fn scan_starts_at_given_row() {
        let pit = Pit::initial();
        assert_eq!(pit.first_occupied_row(4, 18), Some(18));
        assert_eq!(pit.first_occupied_row(5, 18), Some(19));
        assert_eq!(pit.first_occupied_row(6, 18), None);
    }

    #[test]
    fn outside_reads_empty() {
        let pit = Pit::initial();
        assert!(!pit.is_occupied(-1, 19));
        assert!(!pit.is_occupied(10, 19));
        assert!(!pit.is_occupied(9, 20));
        assert_eq!(pit.first_occupied_row(10, 0), None);
    }

    #[test]
    fn parse_roundtrips_initial_layout() {
        let text = INITIAL_LAYOUT.join("\n");
        assert_eq!(Pit::parse(&text).unwrap(), Pit::initial());
    }

    #[test]
    fn parse_accepts_digits_commas_and_comments() {
        let text = "// bottom heavy\n0, 0, 0, 0\n0, 0, 0, 0\n\n0, 0, 0, 0\n1, 1, 0, 1\n";
        let pit = Pit::parse(text).unwrap();
        assert_eq!((pit.width(), pit.height()), (4, 4));
        assert!(pit.is_occupied(0, 3));
        assert!(!pit.is_occupied(2, 3));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Pit::parse("....\n.....\n....\n....").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::Ragged {
                line: 2,
                expected: 4,
                found: 5
            }
        ));
    }

    #[test]
    fn parse_rejects_unknown_cells() {
        let err = Pit::parse("....\n..?.\n....\n....").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidCell { line: 2, found: '?' }));
    }

    #[test]
    fn parse_rejects_oversized_pits() {
        let wide = vec![".".repeat(MAX_PIT_SIDE + 1); MIN_PIT_SIDE].join("\n");
        assert!(matches!(
            Pit::parse(&wide),
            Err(LayoutError::BadSize { width, .. }) if width == MAX_PIT_SIDE + 1
        ));
        let tall = vec!["...."; MAX_PIT_SIDE + 1].join("\n");
        assert!(matches!(Pit::parse(&tall), Err(LayoutError::BadSize { .. })));
        let largest = vec![".".repeat(MAX_PIT_SIDE); MAX_PIT_SIDE].join("\n");
        assert!(Pit::parse(&largest).is_ok());
    }

    #[test]
    fn parse_rejects_tiny_and_empty() {
        assert!(matches!(Pit::parse("...\n...\n...\n..."), Err(LayoutError::BadSize { .. })));
        assert!(matches!(Pit::parse("// nothing\n\n"), Err(LayoutError::Empty)));
    }
}
