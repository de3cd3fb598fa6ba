use criterion::{Criterion, criterion_group, criterion_main};
use gridsweep_core::*;
use std::hint::black_box;

fn open_corner(layout: &MineLayout) -> CellCount {
    let mut engine = PlayEngine::new(layout.clone());
    engine.toggle_flag((0, 0)).unwrap();
    engine.reveal((0, 0)).unwrap();
    engine.revealed_safe_count()
}

fn bench_flood_fill(c: &mut Criterion) {
    let default_board = MineLayout::from_mine_indices((10, 10), &[5, 17, 42, 73, 88]).unwrap();
    let open_board = MineLayout::from_mine_coords((200, 200), &[(199, 199)]).unwrap();

    let mut group = c.benchmark_group("flood_fill");
    group.bench_function("10x10", |b| b.iter(|| open_corner(black_box(&default_board))));
    group.bench_function("200x200", |b| b.iter(|| open_corner(black_box(&open_board))));
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    c.bench_function("generate_default", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            RandomMinefieldGenerator::new(seed).generate(black_box(GameConfig::default()))
        })
    });
}

criterion_group!(benches, bench_flood_fill, bench_generate);
criterion_main!(benches);
