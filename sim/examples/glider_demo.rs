//! Glider and blinker on a small torus, printed as text.
//!
//! Run with: cargo run --example glider_demo

use life_sim::patterns::{BLINKER, GLIDER};
use life_sim::{CellsView, LifeConfig, LifeWorld};

fn main() -> Result<(), life_sim::GridError> {
    println!("=== Life Sim - Glider Demo ===\n");

    let config = LifeConfig {
        width: 16,
        height: 10,
        fixed_timestep: 0.1,
        ticks_per_frame: 1,
        ..Default::default()
    };
    let mut world = LifeWorld::new(config)?;
    world.grid_mut().stamp(&GLIDER, 2, 2);
    world.grid_mut().stamp(&BLINKER, 5, 12);

    print_frame(world.generation(), world.grid().cells());

    // 2 seconds of frame time at 20 FPS, 10 generations per second
    for _ in 0..40 {
        if world.step(0.05) > 0 && world.generation() % 4 == 0 {
            print_frame(world.generation(), world.grid().cells());
        }
    }

    println!("=== Final State (JSON) ===\n");
    println!("{}", world.snapshot_json());
    println!("\n{}", world.profiler().report());
    Ok(())
}

fn print_frame(generation: u64, view: CellsView<'_>) {
    println!("--- Generation {} ({} live) ---", generation, view.live_count());
    let width = view.width() as usize;
    let cells: Vec<char> = view
        .iter()
        .map(|cell| if cell.is_alive() { '#' } else { '.' })
        .collect();
    for row in cells.chunks(width) {
        println!("  {}", row.iter().collect::<String>());
    }
    println!();
}
