use cairn_blocks::Block;
use cairn_geom::IVec3;

use super::WorldGen;

pub const CRATER_CENTER: IVec3 = IVec3::new(96, 52, 320);
pub const CRATER_RADIUS: i64 = 18;
pub const MOON_CENTER: IVec3 = IVec3::new(96, 96, 320);
pub const MOON_OUTER_RADIUS: i64 = 48;
pub const MOON_INNER_RADIUS: i64 = 40;

/// The crater cuts air everywhere inside it, including through the moon.
/// The moon is a hollow shell of stone veined with ore.
pub(super) fn carved_volume(world: &WorldGen, pos: IVec3) -> Option<Block> {
    if pos.distance_sq(CRATER_CENTER) <= CRATER_RADIUS * CRATER_RADIUS {
        return Some(Block::NONE);
    }
    let d2 = pos.distance_sq(MOON_CENTER);
    if d2 <= MOON_OUTER_RADIUS * MOON_OUTER_RADIUS && d2 > MOON_INNER_RADIUS * MOON_INNER_RADIUS {
        return Some(world.ore_or(pos, Block::STONE));
    }
    None
}
