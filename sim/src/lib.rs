//! Life Sim - Simulation Core
//!
//! Conway's Game of Life on a fixed-size toroidal grid, packed one bit per
//! cell. [`Grid`] is the engine: construct it, mutate cells, `tick()` it and
//! read the packed buffer through [`Grid::cells`]. [`LifeWorld`] is an
//! optional fixed-timestep driver built on `bevy_ecs`.

pub mod api;
pub mod cell;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod profiler;
pub mod systems;
pub mod view;
pub mod world;

pub use api::LifeWorld;
pub use cell::Cell;
pub use error::GridError;
pub use grid::{Grid, DEFAULT_PATTERN_SIZE};
pub use patterns::{find_pattern, Pattern, PATTERNS};
pub use systems::{generation_system, Generation, LifeConfig};
pub use view::{packed_len, CellsView, CELLS_PER_BYTE};
pub use world::GridSnapshot;
