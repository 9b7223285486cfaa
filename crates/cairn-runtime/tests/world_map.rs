use std::sync::Arc;
use std::thread;

use cairn_blocks::Block;
use cairn_chunk::generate_chunk_buffer;
use cairn_geom::IVec3;
use cairn_runtime::{KeyedMutex, MapError, RefreshStats, WorldMap};
use cairn_world::{CHUNK_SIZE, ChunkCoord, WorldGen, WorldGenParams};

fn map(extent: usize) -> WorldMap {
    WorldMap::new(
        Arc::new(WorldGen::new(WorldGenParams::default())),
        extent,
        Arc::new(KeyedMutex::new()),
    )
    .unwrap()
}

// High above the terrain, where chunks are cheap to generate.
const SKY: ChunkCoord = ChunkCoord::new(0, 0, 8);

#[test]
fn refresh_same_center_is_free() {
    let m = map(2);
    let first = m.refresh(SKY);
    assert_eq!(first, RefreshStats { regenerated: 8, reused: 0 });
    assert_eq!(m.chunks_generated(), 8);
    assert_eq!(m.refresh(SKY), RefreshStats::default());
    assert_eq!(m.chunks_generated(), 8);
    assert_eq!(m.center(), Some(SKY));
    assert_eq!(m.origin(), SKY.offset(-1, -1, -1));
}

#[test]
fn one_step_regenerates_one_face() {
    let m = map(4);
    m.refresh(SKY);
    let before = m.chunks_generated();
    let stats = m.refresh(SKY.offset(1, 0, 0));
    assert_eq!(stats, RefreshStats { regenerated: 16, reused: 48 });
    assert_eq!(m.chunks_generated(), before + 16);
    let stats = m.refresh(SKY.offset(1, 0, -1));
    assert_eq!(stats.regenerated, 16);
}

#[test]
fn relocation_regenerates_everything() {
    let m = map(2);
    m.refresh(SKY);
    let stats = m.refresh(SKY.offset(100, -50, 3));
    assert_eq!(stats, RefreshStats { regenerated: 8, reused: 0 });
    assert_eq!(m.resident().len(), 8);
}

#[test]
fn map_blocks_match_generator() {
    let m = map(2);
    let center = ChunkCoord::new(0, 0, 1);
    m.refresh(center);
    let wg = m.worldgen().clone();
    let s = CHUNK_SIZE as i32;
    for p in [
        IVec3::new(9, 6, 3),
        IVec3::new(-1, -1, 0),
        IVec3::new(-s, -s, 0),
        IVec3::new(s - 1, s - 1, 2 * s - 1),
        IVec3::new(5, -20, 30),
    ] {
        assert_eq!(m.block(p), Some(wg.generate_block(p)), "{p:?}");
    }
    assert_eq!(m.block(IVec3::new(2 * s, 0, 0)), None);
}

#[test]
fn set_block_edits_in_place_and_rejects_outside() {
    let m = map(2);
    m.refresh(SKY);
    let p = SKY.origin() + IVec3::new(3, 4, 5);
    assert_eq!(m.set_block(p, Block::GLASS), Ok(Block::NONE));
    assert_eq!(m.block(p), Some(Block::GLASS));
    assert_eq!(m.set_block(p, Block::BRICK), Ok(Block::GLASS));
    // A repeated refresh keeps the edit.
    m.refresh(SKY);
    assert_eq!(m.block(p), Some(Block::BRICK));

    let far = IVec3::new(10_000, 0, 0);
    assert_eq!(
        m.set_block(far, Block::STONE),
        Err(MapError::OutsideWindow(ChunkCoord::containing(far)))
    );
}

#[test]
fn ensure_chunk_is_memoized() {
    let m = map(2);
    m.refresh(SKY);
    assert_eq!(m.ensure_chunk(SKY), Ok(false));
    assert!(m.ensure_chunk(SKY.offset(5, 0, 0)).is_err());
    assert_eq!(m.with_chunk(SKY, |c| c.coord), Some(SKY));
    assert_eq!(m.with_chunk(SKY.offset(2, 0, 0), |c| c.coord), None);
}

#[test]
fn concurrent_ensure_generates_each_chunk_once() {
    let m = Arc::new(map(2));
    assert_eq!(m.recenter(SKY), 8);
    assert_eq!(m.chunks_generated(), 0);
    assert_eq!(m.block(SKY.origin()), None);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let m = Arc::clone(&m);
            thread::spawn(move || {
                for dz in -1..1 {
                    for dy in -1..1 {
                        for dx in -1..1 {
                            m.ensure_chunk(SKY.offset(dx, dy, dz)).unwrap();
                        }
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(m.chunks_generated(), 8);
    assert_eq!(m.refresh(SKY), RefreshStats::default());
    assert_eq!(m.block(SKY.origin()), Some(Block::NONE));
}

#[test]
fn refresh_after_lazy_recenter_only_fills_gaps() {
    let m = map(2);
    m.recenter(SKY);
    m.ensure_chunk(SKY).unwrap();
    // Same center: refresh is a no-op even though seven slots are empty.
    assert_eq!(m.refresh(SKY), RefreshStats::default());
    let stats = m.refresh(SKY.offset(0, 0, 1));
    assert_eq!(stats, RefreshStats { regenerated: 7, reused: 1 });
}

#[test]
fn installed_chunk_is_served() {
    let m = map(2);
    m.refresh(SKY);
    let wg = m.worldgen().clone();
    let mut chunk = generate_chunk_buffer(&wg, SKY).chunk;
    let p = SKY.origin();
    chunk.set_world(p, Block::FURNACE);
    m.install(chunk).unwrap();
    assert_eq!(m.block(p), Some(Block::FURNACE));
}

#[test]
fn installs_racing_window_moves_never_leave_stale_slots() {
    let m = Arc::new(map(2));
    let a = SKY;
    let b = SKY.offset(2, 0, 0);
    // Every chunk of both windows; the two windows alias slot for slot.
    let mut chunks = Vec::new();
    for center in [a, b] {
        for dz in -1..1 {
            for dy in -1..1 {
                for dx in -1..1 {
                    let c = center.offset(dx, dy, dz);
                    chunks.push(generate_chunk_buffer(m.worldgen(), c).chunk);
                }
            }
        }
    }
    let chunks = Arc::new(chunks);
    m.refresh(a);

    let installers: Vec<_> = (0..4)
        .map(|t| {
            let m = Arc::clone(&m);
            let chunks = Arc::clone(&chunks);
            thread::spawn(move || {
                for i in 0..400 {
                    let chunk = chunks[(i * 5 + t) % chunks.len()].clone();
                    match m.install(chunk) {
                        Ok(()) | Err(MapError::OutsideWindow(_)) => {}
                        Err(other) => panic!("unexpected {other:?}"),
                    }
                }
            })
        })
        .collect();

    for step in 0..40 {
        let center = if step % 2 == 0 { b } else { a };
        m.refresh(center);
        let origin = m.origin();
        for dz in 0..2 {
            for dy in 0..2 {
                for dx in 0..2 {
                    let c = origin.offset(dx, dy, dz);
                    assert!(m.is_resident(c), "{c:?} missing after refresh to {center:?}");
                }
            }
        }
    }
    for h in installers {
        h.join().unwrap();
    }
    let origin = m.origin();
    assert_eq!(m.resident().len(), 8);
    assert!(m.resident().iter().all(|c| c.cx >= origin.cx && c.cx < origin.cx + 2));
}
