use cairn_blocks::Block;
use cairn_geom::IVec3;

/// Layer holding the block showcase grid and the water channel.
pub const SHOWCASE_Z: i32 = 3;
pub const SHOWCASE_X_END: i32 = 21;
pub const SHOWCASE_Y_END: i32 = 18;
const SHOWCASE_SPACING: i32 = 3;
const SHOWCASE_ROW: i32 = 6;
const CHANNEL_X_END: i32 = 16;
const CHANNEL_Y: [i32; 2] = [-3, -2];

/// Fixed inserts at literal coordinates, independent of noise.
pub(super) fn fixed_insert(pos: IVec3) -> Option<Block> {
    if pos.z != SHOWCASE_Z {
        return None;
    }
    if (0..SHOWCASE_X_END).contains(&pos.x)
        && (0..SHOWCASE_Y_END).contains(&pos.y)
        && pos.x % SHOWCASE_SPACING == 0
        && pos.y % SHOWCASE_SPACING == 0
    {
        let ordinal = (pos.x / SHOWCASE_SPACING) * SHOWCASE_ROW + pos.y / SHOWCASE_SPACING + 1;
        // The last grid cell runs past the table and falls through.
        if let Some(b) = u8::try_from(ordinal).ok().and_then(Block::from_u8) {
            return Some(b);
        }
    }
    if (0..CHANNEL_X_END).contains(&pos.x) && CHANNEL_Y.contains(&pos.y) {
        return Some(Block::WATER);
    }
    None
}
