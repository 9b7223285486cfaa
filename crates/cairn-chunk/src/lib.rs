//! Chunk buffer and chunk generation.
#![forbid(unsafe_code)]

use std::time::Instant;

use cairn_blocks::Block;
use cairn_geom::IVec3;
use cairn_world::{CHUNK_SIZE, ChunkCoord, WorldGen};

/// Number of blocks in one chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// A `CHUNK_SIZE^3` cube of blocks, laid out x-fastest then y then z.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: Box<[Block]>,
}

impl Chunk {
    /// An all-`none` chunk at `coord`.
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: vec![Block::NONE; CHUNK_VOLUME].into_boxed_slice(),
        }
    }

    /// Wraps `blocks`, padding with `none` or truncating to `CHUNK_VOLUME`.
    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<Block>) -> Self {
        let mut b = blocks;
        if b.len() != CHUNK_VOLUME {
            b.resize(CHUNK_VOLUME, Block::NONE);
        }
        Self {
            coord,
            blocks: b.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn idx(x: usize, y: usize, z: usize) -> usize {
        (z * CHUNK_SIZE + y) * CHUNK_SIZE + x
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> Block {
        self.blocks[Self::idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block: Block) -> Block {
        std::mem::replace(&mut self.blocks[Self::idx(x, y, z)], block)
    }

    #[inline]
    pub fn contains_world(&self, pos: IVec3) -> bool {
        ChunkCoord::containing(pos) == self.coord
    }

    #[inline]
    pub fn get_world(&self, pos: IVec3) -> Option<Block> {
        if !self.contains_world(pos) {
            return None;
        }
        let l = ChunkCoord::local_of(pos);
        Some(self.get_local(l.x as usize, l.y as usize, l.z as usize))
    }

    /// Writes `block` at absolute `pos`, returning the previous block, or
    /// `None` when `pos` lies outside this chunk.
    #[inline]
    pub fn set_world(&mut self, pos: IVec3, block: Block) -> Option<Block> {
        if !self.contains_world(pos) {
            return None;
        }
        let l = ChunkCoord::local_of(pos);
        Some(self.set_local(l.x as usize, l.y as usize, l.z as usize, block))
    }

    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_none())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }

    pub fn occupancy(&self) -> ChunkOccupancy {
        if self.has_non_air() {
            ChunkOccupancy::Populated
        } else {
            ChunkOccupancy::Empty
        }
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let solid = self.blocks.iter().filter(|b| !b.is_none()).count();
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("non_air", &solid)
            .finish()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkOccupancy {
    Empty,
    Populated,
}

impl ChunkOccupancy {
    #[inline]
    pub fn is_empty(self) -> bool {
        matches!(self, ChunkOccupancy::Empty)
    }

    #[inline]
    pub fn has_blocks(self) -> bool {
        matches!(self, ChunkOccupancy::Populated)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkGenStats {
    /// The heightmap slot for this chunk column had to be computed.
    pub heightmap_miss: bool,
    pub micros: u64,
}

#[derive(Clone, Debug)]
pub struct ChunkGenerateResult {
    pub chunk: Chunk,
    pub occupancy: ChunkOccupancy,
    pub stats: ChunkGenStats,
}

/// Refill `chunk` in place as chunk `coord`. Idempotent; every cell equals
/// `world.generate_block` at the matching absolute coordinate.
pub fn generate_chunk(world: &WorldGen, chunk: &mut Chunk, coord: ChunkCoord) -> ChunkGenStats {
    let start = Instant::now();
    let heightmap_miss = !world.heightmap().is_cached(coord.cx, coord.cy);
    let tile = world.prepare_column_tile(coord);
    let base = coord.origin();
    chunk.coord = coord;
    let s = CHUNK_SIZE as i32;
    let mut i = 0;
    for z in 0..s {
        for y in 0..s {
            for x in 0..s {
                chunk.blocks[i] = world.block_at_with(&tile, base + IVec3::new(x, y, z));
                i += 1;
            }
        }
    }
    ChunkGenStats {
        heightmap_miss,
        micros: start.elapsed().as_micros() as u64,
    }
}

pub fn generate_chunk_buffer(world: &WorldGen, coord: ChunkCoord) -> ChunkGenerateResult {
    let mut chunk = Chunk::new(coord);
    let stats = generate_chunk(world, &mut chunk, coord);
    let occupancy = chunk.occupancy();
    ChunkGenerateResult {
        chunk,
        occupancy,
        stats,
    }
}
