//! Host-side driver for a grid.
//!
//! The [`Grid`] engine only knows how to compute one generation. `LifeWorld`
//! is the loop around it: it decides when generations happen, how many per
//! frame, and whether the simulation is paused.
//!
//! ## Fixed Timestep
//!
//! `step(dt)` accumulates frame time and runs one fixed update per elapsed
//! `LifeConfig::fixed_timestep`. Each fixed update computes
//! `ticks_per_frame` generations. While paused, frame time is dropped
//! rather than banked, so resuming does not replay a backlog. After a stall
//! at most `max_updates_per_step` updates run and the rest of the backlog
//! is dropped, so one late frame cannot make every following frame late.
//!
//! ## Reading the grid
//!
//! `grid().cells()` borrows the world, so the view is released before the
//! next `step`, `advance` or `grid_mut` call.

use std::time::Instant;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

use crate::error::GridError;
use crate::grid::Grid;
use crate::profiler::{Profiler, SECTION_GENERATION};
#[cfg(feature = "profile")]
use crate::profiler::SECTION_SCHEDULE;
use crate::systems::{generation_system, snapshot_to_json_string, Generation, LifeConfig};
use crate::world::GridSnapshot;

/// ECS world holding one grid and the schedule that steps it.
pub struct LifeWorld {
    world: World,
    schedule: Schedule,
    paused: bool,
    /// Accumulated time for fixed timestep.
    time_accumulator: f32,
    profiler: Profiler,
}

impl LifeWorld {
    /// World with an all-dead grid of the configured size.
    pub fn new(config: LifeConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self::from_grid(grid, config))
    }

    /// World with a randomly seeded grid of the configured size.
    pub fn random(config: LifeConfig) -> Result<Self, GridError> {
        let grid = Grid::random(config.width, config.height)?;
        Ok(Self::from_grid(grid, config))
    }

    /// Wrap an existing grid. The config's width and height are replaced
    /// with the grid's own.
    pub fn from_grid(grid: Grid, mut config: LifeConfig) -> Self {
        config.width = grid.width();
        config.height = grid.height();

        let mut world = World::new();
        world.insert_resource(grid);
        world.insert_resource(config);
        world.insert_resource(Generation::default());

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(generation_system);

        Self {
            world,
            schedule,
            paused: false,
            time_accumulator: 0.0,
            profiler: Profiler::new(),
        }
    }

    /// Feed `dt` seconds of frame time and run the fixed updates it covers.
    /// Returns the number of fixed updates run.
    ///
    /// A `dt` that is negative or not finite is ignored. At most
    /// `LifeConfig::max_updates_per_step` updates run per call; once the cap
    /// is hit the remaining backlog is dropped.
    pub fn step(&mut self, dt: f32) -> u32 {
        if self.paused || !dt.is_finite() || dt < 0.0 {
            return 0;
        }

        let config = self.config();
        let fixed_dt = config.fixed_timestep;
        let max_updates = config.max_updates_per_step.max(1);
        if !fixed_dt.is_finite() || fixed_dt <= 0.0 {
            // No meaningful rate: one update per frame.
            self.fixed_update();
            return 1;
        }

        self.time_accumulator += dt;
        let mut updates = 0;
        while self.time_accumulator >= fixed_dt {
            if updates == max_updates {
                self.time_accumulator = 0.0;
                break;
            }
            self.fixed_update();
            self.time_accumulator -= fixed_dt;
            updates += 1;
        }
        updates
    }

    /// Run one fixed update now, paused or not.
    pub fn advance(&mut self) {
        self.fixed_update();
    }

    fn fixed_update(&mut self) {
        let start = Instant::now();

        #[cfg(feature = "profile")]
        {
            let Self {
                world,
                schedule,
                profiler,
                ..
            } = self;
            profiler.time_section(SECTION_SCHEDULE, || schedule.run(world));
        }
        #[cfg(not(feature = "profile"))]
        self.schedule.run(&mut self.world);

        self.profiler.record(SECTION_GENERATION, start.elapsed());
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
        self.time_accumulator = 0.0;
    }

    /// Flip between playing and paused. Returns the new paused state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.play();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Change the number of generations per fixed update (at least 1).
    pub fn set_ticks_per_frame(&mut self, ticks: u32) {
        self.world.resource_mut::<LifeConfig>().ticks_per_frame = ticks.max(1);
    }

    pub fn config(&self) -> &LifeConfig {
        self.world.resource::<LifeConfig>()
    }

    pub fn grid(&self) -> &Grid {
        self.world.resource::<Grid>()
    }

    /// Mutable access for input handling (`set_cell`, `stamp`, `clear_all`...).
    pub fn grid_mut(&mut self) -> Mut<'_, Grid> {
        self.world.resource_mut::<Grid>()
    }

    /// Generations computed so far.
    pub fn generation(&self) -> u64 {
        self.world.resource::<Generation>().0
    }

    /// Owned copy of the current generation.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::from_grid(self.grid(), self.generation())
    }

    /// Get the snapshot as a JSON string.
    pub fn snapshot_json(&self) -> String {
        snapshot_to_json_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    /// Direct access to the ECS world (for hosts adding their own systems).
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for LifeWorld {
    fn default() -> Self {
        let config = LifeConfig::default();
        let grid = Grid::with_default_pattern();
        Self::from_grid(grid, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER, GLIDER};

    fn small_config() -> LifeConfig {
        LifeConfig {
            width: 8,
            height: 8,
            fixed_timestep: 0.1,
            ticks_per_frame: 1,
            max_updates_per_step: 5,
        }
    }

    #[test]
    fn test_new_world() {
        let world = LifeWorld::new(small_config()).unwrap();
        assert_eq!(world.generation(), 0);
        assert_eq!(world.grid().live_count(), 0);
        assert!(!world.is_paused());
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let config = LifeConfig {
            width: 0,
            ..small_config()
        };
        assert!(matches!(
            LifeWorld::new(config),
            Err(GridError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_default_world_uses_default_pattern() {
        let world = LifeWorld::default();
        assert_eq!(world.grid(), &Grid::with_default_pattern());
        assert_eq!(world.config().width, 64);
    }

    #[test]
    fn test_step_uses_fixed_timestep() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        assert_eq!(world.step(0.05), 0);
        assert_eq!(world.generation(), 0);
        assert_eq!(world.step(0.06), 1);
        assert_eq!(world.generation(), 1);
        assert_eq!(world.step(0.25), 2);
        assert_eq!(world.generation(), 3);
    }

    #[test]
    fn test_burst_of_ticks_per_frame() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        world.set_ticks_per_frame(3);
        world.advance();
        assert_eq!(world.generation(), 3);

        world.set_ticks_per_frame(0);
        assert_eq!(world.config().ticks_per_frame, 1);
    }

    #[test]
    fn test_pause_drops_frame_time() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        world.pause();
        assert_eq!(world.step(1.0), 0);
        assert_eq!(world.generation(), 0);

        // Manual single-step still works while paused.
        world.advance();
        assert_eq!(world.generation(), 1);

        assert!(!world.toggle_pause());
        assert_eq!(world.step(0.1), 1);
        assert_eq!(world.generation(), 2);
    }

    #[test]
    fn test_world_matches_direct_ticks() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.stamp(&GLIDER, 2, 2);
        let mut expected = grid.clone();

        let mut world = LifeWorld::from_grid(grid, small_config());
        for _ in 0..6 {
            world.advance();
            expected.tick();
        }
        assert_eq!(world.grid(), &expected);
    }

    #[test]
    fn test_grid_mut_edits_and_clear_keep_generation() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        world.grid_mut().stamp(&BLINKER, 3, 3);
        world.advance();
        assert_eq!(world.grid().live_count(), 3);

        world.grid_mut().clear_all();
        assert_eq!(world.grid().live_count(), 0);
        assert_eq!(world.generation(), 1);
    }

    #[test]
    fn test_snapshot_json() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        world.grid_mut().set_cell(0, 0);
        world.advance();
        let json = world.snapshot_json();
        assert!(json.contains("\"generation\":1"));
        assert!(json.contains("\"width\":8"));

        let snapshot = world.snapshot();
        assert_eq!(snapshot.live_cells, 0);
        assert_eq!(snapshot.cells.len(), 8);
    }

    #[test]
    fn test_bad_frame_time_is_ignored() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        assert_eq!(world.step(0.1), 1);

        assert_eq!(world.step(f32::NAN), 0);
        assert_eq!(world.step(f32::INFINITY), 0);
        assert_eq!(world.step(f32::NEG_INFINITY), 0);
        assert_eq!(world.step(-0.5), 0);
        assert_eq!(world.generation(), 1);

        // The accumulator was not poisoned.
        let mut updates = 0;
        for _ in 0..10 {
            updates += world.step(0.1);
        }
        assert_eq!(updates, 10);
        assert_eq!(world.generation(), 11);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        assert_eq!(world.step(60.0), 5);
        assert_eq!(world.generation(), 5);

        // Backlog was dropped: the next short frame runs nothing extra.
        assert_eq!(world.step(0.05), 0);
        assert_eq!(world.step(0.05), 1);

        // Huge frame times terminate too.
        assert_eq!(world.step(1.0e9), 5);
        assert_eq!(world.step(f32::MAX), 5);
    }

    #[test]
    fn test_default_config_caps_catch_up() {
        let mut world = LifeWorld::new(LifeConfig::default()).unwrap();
        let cap = world.config().max_updates_per_step;
        assert_eq!(world.step(60.0), cap);
        assert_eq!(world.generation(), cap as u64);
    }

    #[test]
    fn test_zero_cap_still_runs_one_update() {
        let config = LifeConfig {
            max_updates_per_step: 0,
            ..small_config()
        };
        let mut world = LifeWorld::new(config).unwrap();
        assert_eq!(world.step(1.0), 1);
    }

    #[test]
    fn test_degenerate_timestep_runs_once_per_frame() {
        for fixed_timestep in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = LifeConfig {
                fixed_timestep,
                ..small_config()
            };
            let mut world = LifeWorld::new(config).unwrap();
            assert_eq!(world.step(0.01), 1, "timestep {fixed_timestep}");
            assert_eq!(world.step(10.0), 1, "timestep {fixed_timestep}");
            assert_eq!(world.step(f32::NAN), 0, "timestep {fixed_timestep}");
            assert_eq!(world.generation(), 2);
        }
    }

    #[test]
    fn test_snapshot_from_shared_reference() {
        let mut world = LifeWorld::new(small_config()).unwrap();
        world.grid_mut().stamp(&BLINKER, 3, 3);
        let shared: &LifeWorld = &world;
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.live_cells, 3);
        assert!(shared.snapshot_json().contains("\"live_cells\":3"));
    }

    #[test]
    fn test_profiler_sees_every_update() {
        let mut world = LifeWorld::default();
        for _ in 0..4 {
            world.advance();
        }
        let stats = world.profiler().get_section(SECTION_GENERATION).unwrap();
        assert_eq!(stats.call_count, 4);
        assert!(world.profiler().report().contains(SECTION_GENERATION));
    }
}
