use criterion::{Criterion, black_box, criterion_group, criterion_main};

use cairn_geom::IVec3;
use cairn_world::{ChunkCoord, WorldGen, WorldGenParams};

fn bench_generate_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_block");
    let world = WorldGen::new(WorldGenParams::default());
    group.bench_function("column_0_64", |b| {
        b.iter(|| {
            for z in 0..64 {
                black_box(world.generate_block(IVec3::new(17, -5, z)));
            }
        })
    });
    group.bench_function("tile_column_0_64", |b| {
        let tile = world.prepare_column_tile(ChunkCoord::new(0, -1, 0));
        b.iter(|| {
            for z in 0..64 {
                black_box(world.block_at_with(&tile, IVec3::new(17, -5, z)));
            }
        })
    });
    group.finish();
}

fn bench_heightmap_populate(c: &mut Criterion) {
    let mut group = c.benchmark_group("heightmap_populate");
    let world = WorldGen::new(WorldGenParams {
        map_size: 1,
        ..WorldGenParams::default()
    });
    let mut cx = 0;
    group.bench_function("cold_chunk_column", |b| {
        b.iter(|| {
            cx += 1;
            black_box(world.populate_heightmap(cx, 0));
        })
    });
    group.finish();
}

criterion_group!(benches, bench_generate_block, bench_heightmap_populate);
criterion_main!(benches);
