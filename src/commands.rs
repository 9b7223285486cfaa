use std::sync::Arc;
use std::time::{Duration, Instant};

use cairn_blocks::{Block, Face, try_block_texture};
use cairn_chunk::generate_chunk_buffer;
use cairn_geom::IVec3;
use cairn_net::{AvatarState, FrameBuffer, FrameError, Message, encode};
use cairn_runtime::{KeyedMutex, MapError, Runtime, RuntimeError, WorldMap};
use cairn_world::{ChunkCoord, ColumnSource, WorldGen};
use hashbrown::HashMap;
use thiserror::Error;

use crate::cli::{BlockArgs, ChunkArgs, FrameArgs, StreamArgs, WalkArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] cairn_world::ConfigError),
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("frame round trip mismatch for chunk {0:?}")]
    RoundTrip(ChunkCoord),
}

pub fn block(world: &WorldGen, args: &BlockArgs) {
    let pos = IVec3::new(args.x, args.y, args.z);
    let b = world.generate_block(pos);
    let col = world.column(pos.x, pos.y);
    println!("{pos:?} -> {b} (ordinal {}, {:?})", b.id(), b.category());
    println!(
        "column: height={} surface={} tree_type={} chunk={:?}",
        col.height,
        col.surface,
        col.tree_type,
        ChunkCoord::containing(pos)
    );
}

/// Non-air materials of `blocks`, most common first.
pub fn histogram(blocks: &[Block]) -> Vec<(Block, usize)> {
    let mut counts: HashMap<Block, usize> = HashMap::new();
    for &b in blocks.iter().filter(|b| !b.is_none()) {
        *counts.entry(b).or_default() += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out
}

pub fn chunk(world: &WorldGen, args: &ChunkArgs) {
    let coord = ChunkCoord::new(args.cx, args.cy, args.cz);
    let res = generate_chunk_buffer(world, coord);
    println!(
        "chunk {coord:?}: {:?} in {}us (heightmap miss: {})",
        res.occupancy, res.stats.micros, res.stats.heightmap_miss
    );
    for (b, n) in histogram(res.chunk.blocks()) {
        println!("  {:<14} {n:>6}", b.name());
    }
}

pub fn walk(world: Arc<WorldGen>, args: &WalkArgs) -> Result<(), CliError> {
    let locks = Arc::new(KeyedMutex::new());
    let map = WorldMap::new(world, args.extent, locks)?;
    for step in 0..=args.steps as i32 {
        let center = ChunkCoord::new(step, 0, args.cz);
        let t0 = Instant::now();
        let stats = map.refresh(center);
        println!(
            "step {step:>3} center={center:?} regenerated={:>4} reused={:>4} {:?}",
            stats.regenerated,
            stats.reused,
            t0.elapsed()
        );
    }
    let hm = map.worldgen().heightmap().stats();
    println!(
        "generated {} chunks; heightmap hits={} misses={} evictions={}",
        map.chunks_generated(),
        hm.hits,
        hm.misses,
        hm.evictions
    );
    Ok(())
}

pub fn stream(world: Arc<WorldGen>, args: &StreamArgs) -> Result<(), CliError> {
    let locks = Arc::new(KeyedMutex::new());
    let map = WorldMap::new(Arc::clone(&world), args.extent, Arc::clone(&locks))?;
    let runtime = Runtime::new(world, locks, args.workers)?;
    let center = ChunkCoord::new(0, 0, args.cz);
    map.recenter(center);
    if 2 * args.radius.max(0) + 1 > args.extent as i32 {
        log::warn!(
            "radius {} does not fit a window of extent {}; outer chunks will be dropped",
            args.radius,
            args.extent
        );
    }

    let total = runtime.request_around(center, args.radius);
    let deadline = Instant::now() + Duration::from_secs(args.timeout_secs);
    let (mut received, mut installed, mut empty, mut misses, mut gen_ms) = (0, 0, 0, 0, 0u64);
    while received < total {
        let left = deadline.saturating_duration_since(Instant::now());
        let Some(out) = runtime.recv_result_timeout(left) else {
            let (queued, inflight) = runtime.queue_debug_counts();
            log::warn!("stream timed out: {received}/{total} (queued={queued} inflight={inflight})");
            break;
        };
        received += 1;
        gen_ms += u64::from(out.t_gen_ms);
        misses += usize::from(out.heightmap_miss);
        empty += usize::from(out.occupancy.is_empty());
        match map.install(out.chunk) {
            Ok(()) => installed += 1,
            Err(err) => log::debug!("job {} not installed: {err}", out.job_id),
        }
    }
    println!(
        "streamed {received}/{total} chunks with {} workers: installed={installed} empty={empty} heightmap_misses={misses} avg_gen={:.1}ms",
        runtime.workers,
        gen_ms as f64 / received.max(1) as f64
    );
    println!("resident chunks: {}", map.resident().len());
    Ok(())
}

pub fn textures() {
    for b in Block::all() {
        let faces: Vec<String> = Face::ALL
            .iter()
            .map(|&f| match try_block_texture(b, f as u8) {
                Ok(tex) => tex.name().to_owned(),
                Err(_) => "-".to_owned(),
            })
            .collect();
        println!("{:>2} {:<14} {}", b.id(), b.name(), faces.join(" "));
    }
}

pub fn frame(world: &WorldGen, args: &FrameArgs) -> Result<(), CliError> {
    let coord = ChunkCoord::new(args.cx, args.cy, args.cz);
    let res = generate_chunk_buffer(world, coord);
    let o = coord.origin();
    let outgoing = [
        Message::Text(format!("chunk {} {} {}", coord.cx, coord.cy, coord.cz)),
        Message::Avatar(AvatarState {
            id: 1,
            pos: [o.x as f32, o.y as f32, o.z as f32],
            ..AvatarState::default()
        }),
        Message::Chunk(res.chunk),
    ];
    let mut bytes = Vec::new();
    for msg in &outgoing {
        encode(msg, &mut bytes)?;
    }
    println!("encoded {} messages into {} bytes", outgoing.len(), bytes.len());

    // Feed it back in small pieces the way a socket would deliver it.
    let mut buf = FrameBuffer::new();
    let mut decoded = Vec::new();
    for piece in bytes.chunks(1500) {
        buf.push(piece)?;
        while let Some(msg) = buf.next_message()? {
            decoded.push(msg);
        }
    }
    if decoded != outgoing {
        return Err(CliError::RoundTrip(coord));
    }
    for msg in &decoded {
        println!("  {:?}", msg.kind());
    }

    if let Some(path) = &args.out {
        std::fs::write(path, &bytes).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    }
    Ok(())
}
