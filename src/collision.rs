//! Landing point: where the active piece would come to rest in the current column.
//!
//! The result is advisory. It drives the landing preview but never stops the
//! piece or writes into the pit.

use crate::piece::{Piece, Position};
use crate::pit::Pit;

/// Per-column scan behind a landing point, indexed by local box column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingScan {
    /// Lowest occupied local row of each mask column.
    pub lowest_blocks: Vec<Option<i32>>,
    /// First occupied pit row under each box column, searched from the piece's row down.
    pub pit_tops: Vec<Option<i32>>,
}

impl LandingScan {
    pub fn new(piece: &Piece, pit: &Pit) -> Self {
        let mask = piece.mask();
        let g = piece.geometry();
        let size = g.box_size.max(0) as usize;

        let mut lowest_blocks = vec![None; size];
        for (col, row) in mask.filled_cells() {
            let slot = &mut lowest_blocks[col];
            *slot = Some(slot.map_or(row as i32, |r: i32| r.max(row as i32)));
        }

        let Position { x, y } = piece.position;
        let pit_tops = (0..g.box_size)
            .map(|i| {
                (i >= g.min_x)
                    .then(|| pit.first_occupied_row(x + i, y))
                    .flatten()
            })
            .collect();

        Self {
            lowest_blocks,
            pit_tops,
        }
    }

    /// Smallest `pit_top - lowest_block` below `bound`, over columns where both exist.
    /// Ties keep the leftmost column.
    pub fn closest_contact(&self, bound: i32) -> Option<i32> {
        let mut best: Option<i32> = None;
        for (low, top) in self.lowest_blocks.iter().zip(&self.pit_tops) {
            if let (Some(low), Some(top)) = (low, top) {
                let candidate = top - low;
                if candidate < best.unwrap_or(bound) {
                    best = Some(candidate);
                }
            }
        }
        best
    }
}

/// Landing point plus the scan that produced it.
pub fn resolve(piece: &Piece, pit: &Pit) -> (Position, LandingScan) {
    let scan = LandingScan::new(piece, pit);
    // A top-row block over the bottom row is not a contact; the floor decides.
    let y = match scan.closest_contact(pit.height() as i32 - 1) {
        Some(contact) => contact - 1,
        None => {
            let g = piece.geometry();
            pit.height() as i32 - g.height - g.min_y
        }
    };
    (Position::new(piece.position.x, y), scan)
}
