//! The grid engine: a toroidal Game of Life board packed one bit per cell.
//!
//! ## Coordinates
//!
//! Every method that takes `(row, col)` wraps it onto the torus: `row` is
//! taken modulo `height` and `col` modulo `width`. Neighbor counting uses
//! the same rule, so `set_cell(height, 0)` and `set_cell(0, 0)` touch the
//! same cell. Direct cell access never fails.
//!
//! ## Small grids
//!
//! On a grid one cell tall (or wide) the row above and the row below are
//! the cell's own row, so a cell sees itself and its row-mates more than
//! once. A lone live cell on a 1x1 grid has 8 live neighbors. This is the
//! wraparound rule applied literally, not a special case.

use bevy_ecs::prelude::*;
use rand::{Rng, RngCore};

use crate::cell::Cell;
use crate::error::GridError;
use crate::patterns::Pattern;
use crate::view::{bit_is_set, packed_len, CellsView, CELLS_PER_BYTE};

/// Side length of the square grid built by [`Grid::with_default_pattern`].
pub const DEFAULT_PATTERN_SIZE: u32 = 64;

/// Fixed-size toroidal Life grid.
///
/// Holds two equally sized buffers: `cells` is the current generation and
/// `next` is scratch space that [`tick`](Grid::tick) writes into before the
/// two are swapped. Readers only ever see `cells`.
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
    next: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell dead.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// 64x64 demonstration grid: cell `i` is alive when `i` is even or a
    /// multiple of 7.
    pub fn with_default_pattern() -> Self {
        let mut grid = Self::blank(DEFAULT_PATTERN_SIZE, DEFAULT_PATTERN_SIZE);
        for idx in 0..grid.cell_count() {
            if idx % 2 == 0 || idx % 7 == 0 {
                set_bit(&mut grid.cells, idx);
            }
        }
        grid
    }

    /// Random grid using the thread-local generator.
    pub fn random(width: u32, height: u32) -> Result<Self, GridError> {
        Self::random_with(width, height, &mut rand::thread_rng())
    }

    /// Random grid, each cell alive with probability 1/2, drawn from `rng`.
    pub fn random_with<R: Rng + ?Sized>(
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height)?;
        grid.randomize(rng);
        Ok(grid)
    }

    /// Rebuild a grid from a packed buffer laid out as described in
    /// [`crate::view`]. Bits past the last cell are cleared.
    pub fn from_packed(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, GridError> {
        check_dimensions(width, height)?;
        let expected = packed_len(width, height);
        if bytes.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }

        let mut grid = Self {
            width,
            height,
            cells: bytes,
            next: vec![0; expected],
        };
        grid.mask_tail();
        Ok(grid)
    }

    /// Dimensions already validated by the caller.
    fn blank(width: u32, height: u32) -> Self {
        let len = packed_len(width, height);
        Self {
            width,
            height,
            cells: vec![0; len],
            next: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Read-only view of the current generation.
    pub fn cells(&self) -> CellsView<'_> {
        CellsView::new(&self.cells, self.width, self.height)
    }

    /// Number of live cells in the current generation.
    pub fn live_count(&self) -> usize {
        self.cells().live_count()
    }

    /// Row-major index of `(row, col)` after wrapping onto the torus.
    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        let row = row % self.height;
        let col = col % self.width;
        row as usize * self.width as usize + col as usize
    }

    pub fn get(&self, row: u32, col: u32) -> Cell {
        Cell::from(bit_is_set(&self.cells, self.index(row, col)))
    }

    pub fn is_alive(&self, row: u32, col: u32) -> bool {
        self.get(row, col).is_alive()
    }

    fn put(&mut self, row: u32, col: u32, cell: Cell) {
        let idx = self.index(row, col);
        match cell {
            Cell::Alive => set_bit(&mut self.cells, idx),
            Cell::Dead => self.cells[idx / CELLS_PER_BYTE] &= !(1 << (idx % CELLS_PER_BYTE)),
        }
    }

    /// Force `(row, col)` alive.
    pub fn set_cell(&mut self, row: u32, col: u32) {
        self.put(row, col, Cell::Alive);
    }

    /// Force `(row, col)` dead.
    pub fn clear_cell(&mut self, row: u32, col: u32) {
        self.put(row, col, Cell::Dead);
    }

    /// Flip `(row, col)`.
    pub fn toggle_cell(&mut self, row: u32, col: u32) {
        let idx = self.index(row, col);
        self.cells[idx / CELLS_PER_BYTE] ^= 1 << (idx % CELLS_PER_BYTE);
    }

    /// Set every cell of `pattern` alive, anchored at `(row, col)`.
    ///
    /// Pattern offsets wrap around the edges like any other coordinate.
    /// Cells outside the pattern are left untouched.
    pub fn stamp(&mut self, pattern: &Pattern, row: u32, col: u32) {
        for &(dr, dc) in pattern.cells {
            let r = wrap_offset(row % self.height, dr, self.height);
            let c = wrap_offset(col % self.width, dc, self.width);
            self.set_cell(r, c);
        }
    }

    /// Reassign every cell, each alive with probability 1/2.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // Every bit of a uniformly random byte is an independent fair coin.
        rng.fill_bytes(&mut self.cells);
        self.mask_tail();
    }

    /// [`randomize`](Self::randomize) with the thread-local generator.
    pub fn randomize_thread_rng(&mut self) {
        self.randomize(&mut rand::thread_rng());
    }

    /// Kill every cell.
    pub fn clear_all(&mut self) {
        self.cells.fill(0);
    }

    /// Live neighbors of `(row, col)` among its 8 toroidal neighbors.
    pub fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        count_live_neighbors(
            &self.cells,
            self.width,
            self.height,
            row % self.height,
            col % self.width,
        )
    }

    /// Advance one generation.
    ///
    /// Every neighbor count is taken from the current buffer while the new
    /// generation is written to the scratch buffer; the two are swapped only
    /// once the whole board is computed.
    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        let current = &self.cells;
        let next = &mut self.next;
        next.fill(0);

        for row in 0..height {
            for col in 0..width {
                let idx = row as usize * width as usize + col as usize;
                let cell = Cell::from(bit_is_set(current, idx));
                let neighbors = count_live_neighbors(current, width, height, row, col);
                if cell.next(neighbors).is_alive() {
                    set_bit(next, idx);
                }
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
    }

    /// Clear the unused high bits of the last byte.
    fn mask_tail(&mut self) {
        let used = self.cell_count() % CELLS_PER_BYTE;
        if used != 0 {
            if let Some(last) = self.cells.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }
}

/// Two grids are equal when they have the same dimensions and the same
/// current generation. The scratch buffer is not compared.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Grid {}

fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(GridError::TooLarge { width, height })?;
    Ok(())
}

#[inline]
fn set_bit(bytes: &mut [u8], idx: usize) {
    bytes[idx / CELLS_PER_BYTE] |= 1 << (idx % CELLS_PER_BYTE);
}

/// `base + offset` on a ring of `size` positions. `base` must be `< size`.
#[inline]
fn wrap_offset(base: u32, offset: i32, size: u32) -> u32 {
    (base as i64 + offset as i64).rem_euclid(size as i64) as u32
}

/// Count live cells around `(row, col)`, which must already be in range.
fn count_live_neighbors(cells: &[u8], width: u32, height: u32, row: u32, col: u32) -> u8 {
    let north = if row == 0 { height - 1 } else { row - 1 };
    let south = if row == height - 1 { 0 } else { row + 1 };
    let west = if col == 0 { width - 1 } else { col - 1 };
    let east = if col == width - 1 { 0 } else { col + 1 };

    let rows = [north, row, south];
    let cols = [west, col, east];

    let mut count = 0;
    for (dr, &r) in rows.iter().enumerate() {
        for (dc, &c) in cols.iter().enumerate() {
            // Skip by position, not by index: on a 1-wide torus a neighbor
            // can be the center cell itself.
            if dr == 1 && dc == 1 {
                continue;
            }
            let idx = r as usize * width as usize + c as usize;
            if bit_is_set(cells, idx) {
                count += 1;
            }
        }
    }
    count
}
