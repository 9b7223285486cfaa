mod carve;
mod clouds;
mod column;
mod showcase;
mod terrain;
mod trees;

use cairn_blocks::Block;
use cairn_geom::IVec3;

use crate::chunk_coord::ChunkCoord;
use crate::heightmap::{ColumnInfo, ColumnSource, Heightmap};
use crate::noise::OctaveNoise;
use crate::worldgen::WorldGenParams;
use crate::CHUNK_SIZE;

use self::carve::carved_volume;
use self::clouds::atmosphere;
use self::column::ColumnSampler;
use self::showcase::fixed_insert;
use self::terrain::terrain_fill;
use self::trees::vegetation;

pub use self::carve::{
    CRATER_CENTER, CRATER_RADIUS, MOON_CENTER, MOON_INNER_RADIUS, MOON_OUTER_RADIUS,
};
pub use self::showcase::{SHOWCASE_X_END, SHOWCASE_Y_END, SHOWCASE_Z};
pub use self::terrain::{SAND_DEPTH, ore_for};
pub use self::trees::{CANOPY_HIGH, CANOPY_LOW, TRUNK_HEIGHT, leaves_block, trunk_block};

const ORE_SEED_SALT: i32 = 0x0EE5_1A7E;
const CLOUD_SEED_SALT: i32 = 0x0C10_0D5A;

pub(crate) struct NoiseSet {
    pub(crate) ore: OctaveNoise,
    pub(crate) cloud: OctaveNoise,
}

/// Generator context: parameters, noise layers and the column heightmap.
/// Shared across worker threads behind an `Arc`; every query is `&self`.
pub struct WorldGen {
    params: WorldGenParams,
    pub(crate) noise: NoiseSet,
    columns: ColumnSampler,
    heightmap: Heightmap,
}

impl WorldGen {
    pub fn new(params: WorldGenParams) -> Self {
        let noise = NoiseSet {
            ore: OctaveNoise::new(params.seed ^ ORE_SEED_SALT, params.ore_noise.clone()),
            cloud: OctaveNoise::new(params.seed ^ CLOUD_SEED_SALT, params.cloud_noise.clone()),
        };
        let columns = ColumnSampler::new(&params);
        let heightmap = Heightmap::new(params.map_size);
        log::debug!(
            "worldgen seed={} base_height={} heightmap={}x{}",
            params.seed,
            params.base_height,
            heightmap.map_size(),
            heightmap.map_size()
        );
        Self {
            params,
            noise,
            columns,
            heightmap,
        }
    }

    #[inline]
    pub fn params(&self) -> &WorldGenParams {
        &self.params
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    #[inline]
    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    /// Memoize every column of chunk column `(cx, cy)`. Returns `true` when
    /// the slot had to be computed.
    pub fn populate_heightmap(&self, cx: i32, cy: i32) -> bool {
        self.heightmap
            .populate(cx, cy, |cx, cy, out| self.columns.fill(cx, cy, out))
    }

    /// Column attributes straight from the noise, bypassing the cache.
    pub fn column_uncached(&self, x: i32, y: i32) -> ColumnInfo {
        self.columns.column_at(x, y)
    }

    /// Block at absolute coordinate `pos`. Pure: the same input always
    /// yields the same block, whatever the heightmap currently holds.
    pub fn generate_block(&self, pos: IVec3) -> Block {
        self.block_at_with(self, pos)
    }

    /// Layer composition; the first layer that claims the cell wins.
    pub fn block_at_with<C: ColumnSource + ?Sized>(&self, cols: &C, pos: IVec3) -> Block {
        carved_volume(self, pos)
            .or_else(|| fixed_insert(pos))
            .or_else(|| vegetation(cols, pos))
            .or_else(|| atmosphere(self, pos))
            .or_else(|| terrain_fill(self, cols, pos))
            .unwrap_or(Block::NONE)
    }

    /// Populate the heightmap for `coord`'s chunk column and snapshot the
    /// columns it and its canopy neighbors need.
    pub fn prepare_column_tile(&self, coord: ChunkCoord) -> ColumnTile<'_> {
        self.populate_heightmap(coord.cx, coord.cy);
        ColumnTile::new(self, coord)
    }

    #[inline]
    pub(crate) fn fill_noise(&self, pos: IVec3) -> f32 {
        self.noise
            .ore
            .sample3(pos.x as f32, pos.y as f32, pos.z as f32)
    }

    /// `fallback` unless the fill noise crosses the ore threshold.
    pub(crate) fn ore_or(&self, pos: IVec3, fallback: Block) -> Block {
        if self.fill_noise(pos) >= self.params.ore_threshold {
            ore_for(pos)
        } else {
            fallback
        }
    }
}

impl ColumnSource for WorldGen {
    #[inline]
    fn column(&self, x: i32, y: i32) -> ColumnInfo {
        self.heightmap
            .column(x, y, |cx, cy, out| self.columns.fill(cx, cy, out))
    }
}

/// Column snapshot covering one chunk plus a one-column border, so chunk
/// fills read columns without touching heightmap locks per block.
pub struct ColumnTile<'w> {
    world: &'w WorldGen,
    base_x: i64,
    base_y: i64,
    columns: Vec<ColumnInfo>,
}

const TILE: i64 = CHUNK_SIZE as i64 + 2;

impl<'w> ColumnTile<'w> {
    fn new(world: &'w WorldGen, coord: ChunkCoord) -> Self {
        let origin = coord.origin();
        let (base_x, base_y) = (i64::from(origin.x) - 1, i64::from(origin.y) - 1);
        let mut columns = Vec::with_capacity((TILE * TILE) as usize);
        for dy in 0..TILE {
            for dx in 0..TILE {
                // Border columns past the edge of the coordinate space stay empty.
                let col = match (i32::try_from(base_x + dx), i32::try_from(base_y + dy)) {
                    (Ok(x), Ok(y)) => world.column(x, y),
                    _ => ColumnInfo::default(),
                };
                columns.push(col);
            }
        }
        Self {
            world,
            base_x,
            base_y,
            columns,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (dx, dy) = (i64::from(x) - self.base_x, i64::from(y) - self.base_y);
        ((0..TILE).contains(&dx) && (0..TILE).contains(&dy)).then(|| (dy * TILE + dx) as usize)
    }
}

impl ColumnSource for ColumnTile<'_> {
    #[inline]
    fn column(&self, x: i32, y: i32) -> ColumnInfo {
        match self.index(x, y) {
            Some(i) => self.columns[i],
            None => self.world.column(x, y),
        }
    }
}
