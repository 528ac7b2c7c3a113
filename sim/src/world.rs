//! Owned snapshot of a grid generation.
//!
//! A [`CellsView`](crate::view::CellsView) borrows the grid and is gone at
//! the next mutation. `GridSnapshot` is the copy a host takes when it needs
//! to hold on to a generation (hand it to another thread, diff it against
//! a later one, send it across a binding layer as JSON).

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::grid::Grid;
use crate::systems::serialization::snapshot_from_json_string;

/// Serializable copy of one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Number of generations stepped before this snapshot was taken.
    pub generation: u64,
    pub width: u32,
    pub height: u32,
    /// Live cells at snapshot time.
    pub live_cells: usize,
    /// Packed cell bits, same layout as the live buffer.
    pub cells: Vec<u8>,
}

impl GridSnapshot {
    /// Copy the current generation of `grid`.
    pub fn from_grid(grid: &Grid, generation: u64) -> Self {
        let view = grid.cells();
        Self {
            generation,
            width: grid.width(),
            height: grid.height(),
            live_cells: view.live_count(),
            cells: view.as_bytes().to_vec(),
        }
    }

    /// Rebuild a grid holding this generation.
    ///
    /// Fails if `live_cells` disagrees with the packed bits, so a stale or
    /// edited snapshot is caught rather than restored.
    pub fn to_grid(&self) -> Result<Grid, GridError> {
        let grid = Grid::from_packed(self.width, self.height, self.cells.clone())?;
        let actual = grid.live_count();
        if actual != self.live_cells {
            return Err(GridError::LiveCountMismatch {
                expected: self.live_cells,
                actual,
            });
        }
        Ok(grid)
    }

    /// Parse a snapshot and rebuild its grid in one go.
    pub fn grid_from_json(json: &str) -> Result<Grid, GridError> {
        snapshot_from_json_string(json)?.to_grid()
    }
}

impl Grid {
    /// Rebuild a grid from a snapshot.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, GridError> {
        snapshot.to_grid()
    }
}
