//! Generation stepping as an ECS system.
//!
//! `generation_system` reads `LifeConfig` and writes the `Grid` and
//! `Generation` resources, so a host that already runs a `bevy_ecs`
//! schedule can drop it in next to its own systems.

use bevy_ecs::prelude::*;

use crate::grid::Grid;

/// Configuration for the driving loop.
#[derive(Resource, Debug, Clone)]
pub struct LifeConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Fixed timestep in seconds (e.g. 1/30 for 30 updates per second).
    pub fixed_timestep: f32,
    /// Generations computed per fixed update.
    pub ticks_per_frame: u32,
    /// Fixed updates one `step` may run to catch up after a slow frame.
    pub max_updates_per_step: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            fixed_timestep: 1.0 / 30.0, // 30 Hz
            ticks_per_frame: 1,
            max_updates_per_step: 5,
        }
    }
}

/// Number of generations computed since the world was created.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation(pub u64);

impl Generation {
    pub fn advance(&mut self, by: u64) {
        self.0 = self.0.wrapping_add(by);
    }
}

/// Run one burst of `ticks_per_frame` generations.
pub fn generation_system(
    config: Res<LifeConfig>,
    mut grid: ResMut<Grid>,
    mut generation: ResMut<Generation>,
) {
    let burst = config.ticks_per_frame.max(1);
    for _ in 0..burst {
        grid.tick();
    }
    generation.advance(burst as u64);
}
