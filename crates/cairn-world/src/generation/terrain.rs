use cairn_blocks::Block;
use cairn_geom::IVec3;

use super::WorldGen;
use crate::heightmap::ColumnSource;

/// Depth below the surface past which sand turns to dirt.
pub const SAND_DEPTH: i32 = 3;

pub(super) fn terrain_fill<C: ColumnSource + ?Sized>(
    world: &WorldGen,
    cols: &C,
    pos: IVec3,
) -> Option<Block> {
    let col = cols.column(pos.x, pos.y);
    if pos.z >= col.height {
        return None;
    }
    let p = world.params();
    let n = world.fill_noise(pos);
    if n >= p.ore_threshold {
        return Some(ore_for(pos));
    }
    if n > p.cave_threshold {
        let depth = i64::from(col.height) - i64::from(pos.z);
        return Some(if col.surface == Block::SAND && depth > i64::from(SAND_DEPTH) {
            Block::DIRT
        } else {
            col.surface
        });
    }
    Some(Block::NONE)
}

/// Coordinate-derived ore pick shared by the moon shell and terrain fill.
pub fn ore_for(pos: IVec3) -> Block {
    let i = ((pos.x ^ pos.y ^ pos.z) / 3).rem_euclid(Block::ORE_COUNT as i32);
    Block::ore(i as u8)
}
