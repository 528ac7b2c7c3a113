//! ECS resources and systems for driving a grid.
//!
//! - `generation_system` - runs `LifeConfig::ticks_per_frame` generations
//!   and bumps the `Generation` counter
//!
//! Serialization helpers for snapshots live in `serialization`.

pub mod generation;
pub mod serialization;

pub use generation::*;
pub use serialization::*;
