//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a
//! piece kind. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows above the board (y < 0) are legal piece territory
//! during spawn and never hold content.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single piece cell fits at (x, y).
    ///
    /// Lateral bounds and the floor always reject; rows above the board
    /// (y < 0) accept as long as the column is in range, which is what lets
    /// pieces spawn partially off-screen.
    pub fn fits(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        if y < 0 {
            return true;
        }
        !self.is_occupied(x, y)
    }

    /// Collision test for a shape with origin at (x, y).
    /// Returns true if any mino falls outside the playable area or on top of
    /// existing content.
    pub fn collides(&self, shape: &[(i8, i8)], x: i8, y: i8) -> bool {
        shape.iter().any(|&(dx, dy)| !self.fits(x + dx, y + dy))
    }

    /// Merge a locked shape into the grid.
    ///
    /// Minos that resolve to rows above the board are dropped silently; they
    /// can only occur when a piece locks before fully entering the grid.
    pub fn merge(&mut self, shape: &[(i8, i8)], x: i8, y: i8, kind: PieceKind) {
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows, shifting the rows above them down and inserting
    /// empty rows at the top. Returns the number of rows cleared.
    ///
    /// A single bottom-up pass with a write cursor resolves adjacent and
    /// non-adjacent clears together, equivalent to re-checking the same row
    /// index after each removal.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut cleared = 0;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Blank the rows that opened up at the top.
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a rows-of-cells array (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            row.copy_from_slice(&self.cells[start..start + width]);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
