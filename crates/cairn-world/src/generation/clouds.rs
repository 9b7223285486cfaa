use cairn_blocks::Block;
use cairn_geom::IVec3;

use super::WorldGen;

pub(super) fn atmosphere(world: &WorldGen, pos: IVec3) -> Option<Block> {
    let p = world.params();
    if pos.z < p.cloud_min_z || pos.z >= p.cloud_max_z {
        return None;
    }
    let n = world.noise.cloud.sample3(pos.x as f32, pos.y as f32, pos.z as f32);
    (n < p.cloud_threshold).then_some(Block::CLOUD)
}
