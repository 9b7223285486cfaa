use cairn_blocks::Block;

use crate::CHUNK_SIZE;
use crate::heightmap::ColumnInfo;
use crate::noise::OctaveNoise;
use crate::worldgen::WorldGenParams;

const S: i32 = CHUNK_SIZE as i32;
const TREE_SALT: u32 = 0x7265_6531;
const SPECIES_SALT: u32 = 0x5350_4543;

/// Computes column attributes from the height noise. Pure; the heightmap
/// memoizes what this produces.
pub(crate) struct ColumnSampler {
    height: OctaveNoise,
    seed: u32,
    base_height: i32,
    amplitude: f32,
    sand_level: i32,
    snow_level: i32,
    tree_density: f32,
}

impl ColumnSampler {
    pub(crate) fn new(params: &WorldGenParams) -> Self {
        Self {
            height: OctaveNoise::new(params.seed, params.height_noise.clone()),
            seed: params.seed as u32,
            base_height: params.base_height,
            amplitude: params.amplitude,
            sand_level: params.sand_level,
            snow_level: params.snow_level,
            tree_density: params.tree_density,
        }
    }

    pub(crate) fn column_at(&self, x: i32, y: i32) -> ColumnInfo {
        let n = self.height.sample2(x as f32, y as f32);
        let height = self.base_height + (n * self.amplitude).round() as i32;
        let surface = if height <= self.sand_level {
            Block::SAND
        } else if height >= self.snow_level {
            Block::SNOW
        } else {
            Block::GRASS
        };
        let tree_type = if surface == Block::GRASS
            && rand01_column(self.seed, x, y, TREE_SALT) < self.tree_density
        {
            1 + (hash2_column(x, y, self.seed ^ SPECIES_SALT) % 3) as u8
        } else {
            0
        };
        ColumnInfo {
            height,
            tree_type,
            surface,
        }
    }

    /// Heightmap fill callback: every column of chunk column `(cx, cy)`.
    pub(crate) fn fill(&self, cx: i32, cy: i32, out: &mut [ColumnInfo]) {
        let (bx, by) = (cx * S, cy * S);
        for ly in 0..S {
            for lx in 0..S {
                out[(ly * S + lx) as usize] = self.column_at(bx + lx, by + ly);
            }
        }
    }
}

fn hash2_column(ix: i32, iy: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iy as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

fn rand01_column(seed: u32, ix: i32, iy: i32, salt: u32) -> f32 {
    let h = hash2_column(ix, iy, (seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_params_give_flat_grass() {
        let params = WorldGenParams {
            amplitude: 0.0,
            base_height: 40,
            tree_density: 0.0,
            ..WorldGenParams::default()
        };
        let s = ColumnSampler::new(&params);
        for (x, y) in [(0, 0), (-17, 300), (1000, -1000)] {
            let c = s.column_at(x, y);
            assert_eq!(c.height, 40);
            assert_eq!(c.surface, Block::GRASS);
            assert_eq!(c.tree_type, 0);
        }
    }

    #[test]
    fn trees_only_grow_on_grass_and_pick_a_species() {
        let params = WorldGenParams {
            tree_density: 1.0,
            ..WorldGenParams::default()
        };
        let s = ColumnSampler::new(&params);
        for x in -64..64 {
            let c = s.column_at(x, x * 3);
            if c.surface == Block::GRASS {
                assert!((1..=3).contains(&c.tree_type), "{c:?}");
            } else {
                assert_eq!(c.tree_type, 0);
            }
        }
    }

    #[test]
    fn fill_matches_point_samples() {
        let s = ColumnSampler::new(&WorldGenParams::default());
        let mut buf = vec![ColumnInfo::default(); CHUNK_SIZE * CHUNK_SIZE];
        s.fill(-1, 2, &mut buf);
        assert_eq!(buf[0], s.column_at(-S, 2 * S));
        assert_eq!(buf[(3 * S + 5) as usize], s.column_at(-S + 5, 2 * S + 3));
    }
}
