use criterion::{black_box, criterion_group, criterion_main, Criterion};
use life_sim::Grid;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn tick_default_pattern(c: &mut Criterion) {
    let mut grid = Grid::with_default_pattern();
    c.bench_function("default_pattern_9_ticks", |b| {
        b.iter(|| {
            for _ in 0..9 {
                grid.tick();
            }
            black_box(grid.cells().len())
        })
    });
}

fn tick_random_256(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let Ok(mut grid) = Grid::random_with(256, 256, &mut rng) else {
        return;
    };
    c.bench_function("random_256x256_tick", |b| {
        b.iter(|| {
            grid.tick();
            black_box(grid.live_count())
        })
    });
}

criterion_group!(benches, tick_default_pattern, tick_random_256);
criterion_main!(benches);
