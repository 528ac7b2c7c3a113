//! Read-only view over a grid's packed cell buffer.
//!
//! This is what a rendering driver reads after each generation step.
//!
//! # Buffer Layout
//!
//! Cells are numbered row-major from zero: cell `(row, col)` has index
//! `idx = row * width + col`. One bit per cell, eight cells per byte:
//!
//! ```text
//! byte:   [        0        ][        1        ] ...
//! bit:     0 1 2 3 4 5 6 7    0 1 2 3 4 5 6 7
//! cell:    0 1 2 3 4 5 6 7    8 9 ...
//! ```
//!
//! - cell `idx` is bit `idx % 8` (least significant first) of byte `idx / 8`
//! - a set bit is a live cell
//! - the buffer is `ceil(width * height / 8)` bytes long
//! - bits past `width * height - 1` in the last byte are always zero, but
//!   readers must not rely on them; stop at `width * height`
//!
//! # Validity
//!
//! A `CellsView` borrows the grid, so it cannot outlive the generation it
//! was taken from: any mutating call needs `&mut Grid` and ends the borrow.
//! Hosts that need to keep the data across a step take a
//! [`GridSnapshot`](crate::world::GridSnapshot) instead.

use crate::cell::Cell;

/// Number of cells packed into each byte of the buffer.
pub const CELLS_PER_BYTE: usize = 8;

/// Byte length of the packed buffer for a `width` x `height` grid.
#[inline]
pub fn packed_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(CELLS_PER_BYTE)
}

/// Borrowed, read-only view of the current generation.
#[derive(Debug, Clone, Copy)]
pub struct CellsView<'a> {
    bytes: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> CellsView<'a> {
    pub(crate) fn new(bytes: &'a [u8], width: u32, height: u32) -> Self {
        debug_assert_eq!(bytes.len(), packed_len(width, height));
        Self { bytes, width, height }
    }

    /// Raw packed bytes (see module docs for the layout).
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Pointer to the first byte, for hosts reading through FFI.
    ///
    /// Valid for [`len`](Self::len) bytes while this view is alive.
    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells covered by the view (`width * height`).
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// State of cell `idx`, or `None` past the last cell.
    pub fn cell(&self, idx: usize) -> Option<Cell> {
        if idx >= self.cell_count() {
            return None;
        }
        Some(Cell::from(bit_is_set(self.bytes, idx)))
    }

    /// Every cell in index order, exactly `width * height` items.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + 'a {
        let bytes = self.bytes;
        (0..self.cell_count()).map(move |idx| Cell::from(bit_is_set(bytes, idx)))
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        // Trailing bits are kept clear by the grid, so whole bytes can be counted.
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[inline]
pub(crate) fn bit_is_set(bytes: &[u8], idx: usize) -> bool {
    bytes[idx / CELLS_PER_BYTE] & (1 << (idx % CELLS_PER_BYTE)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_len_rounds_up() {
        assert_eq!(packed_len(1, 1), 1);
        assert_eq!(packed_len(8, 1), 1);
        assert_eq!(packed_len(3, 3), 2);
        assert_eq!(packed_len(64, 64), 512);
        assert_eq!(packed_len(5, 5), 4);
    }

    #[test]
    fn test_cell_reads_lsb_first() {
        // cells 0 and 9 alive on a 3x4 grid (12 cells, 2 bytes)
        let bytes = [0b0000_0001, 0b0000_0010];
        let view = CellsView::new(&bytes, 3, 4);
        assert_eq!(view.cell(0), Some(Cell::Alive));
        assert_eq!(view.cell(1), Some(Cell::Dead));
        assert_eq!(view.cell(9), Some(Cell::Alive));
        assert_eq!(view.cell(12), None);
        assert_eq!(view.live_count(), 2);
    }

    #[test]
    fn test_iter_stops_at_last_cell() {
        let bytes = [0xff, 0x0f];
        let view = CellsView::new(&bytes, 3, 4);
        assert_eq!(view.iter().count(), 12);
        assert!(view.iter().all(Cell::is_alive));
    }
}
