use cairn_blocks::Block;
use cairn_geom::IVec3;

use crate::heightmap::ColumnSource;

pub const TRUNK_HEIGHT: i32 = 5;
/// Canopy occupies `[height + CANOPY_LOW, height + CANOPY_HIGH)` of the tree column.
pub const CANOPY_LOW: i32 = 3;
pub const CANOPY_HIGH: i32 = 7;

/// Scan order for canopy neighbors; the first tree found wins.
const NEIGHBORS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub fn trunk_block(tree_type: u8) -> Block {
    match tree_type {
        2 => Block::BIRCH_WOOD,
        3 => Block::PINE_WOOD,
        _ => Block::WOOD,
    }
}

pub fn leaves_block(tree_type: u8) -> Block {
    match tree_type {
        2 => Block::BIRCH_LEAVES,
        3 => Block::PINE_LEAVES,
        _ => Block::LEAVES,
    }
}

pub(super) fn vegetation<C: ColumnSource + ?Sized>(cols: &C, pos: IVec3) -> Option<Block> {
    let here = cols.column(pos.x, pos.y);
    if here.tree_type != 0
        && pos.z >= here.height
        && i64::from(pos.z) < i64::from(here.height) + i64::from(TRUNK_HEIGHT)
    {
        return Some(trunk_block(here.tree_type));
    }
    for (dx, dy) in NEIGHBORS {
        // Columns past the edge of the coordinate space carry no trees.
        let (Some(nx), Some(ny)) = (pos.x.checked_add(dx), pos.y.checked_add(dy)) else {
            continue;
        };
        let n = cols.column(nx, ny);
        if n.tree_type == 0 {
            continue;
        }
        let nh = i64::from(n.height);
        let band = (nh + i64::from(CANOPY_LOW))..(nh + i64::from(CANOPY_HIGH));
        return band.contains(&i64::from(pos.z)).then(|| leaves_block(n.tree_type));
    }
    None
}
