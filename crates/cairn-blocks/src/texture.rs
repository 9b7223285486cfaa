use thiserror::Error;

use crate::face::Face;
use crate::table::FaceTextures;
use crate::types::Block;

/// Texture layer index consumed by the block shader.
///
/// The animated groups are addressed by the shader as `base + frame`, so
/// `WATER_FRAME_BASE` and `LAVA_FRAME_BASE` are pinned below; adding a
/// static texture means shifting both groups and the shader together.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum BlockTexture {
    Stone = 0,
    Dirt,
    GrassTop,
    GrassSide,
    Sand,
    Snow,
    Gravel,
    WoodTop,
    WoodSide,
    BirchWoodSide,
    PineWoodSide,
    PineWoodTop,
    Leaves,
    BirchLeaves,
    PineLeaves,
    Glass,
    Planks,
    Brick,
    Cobblestone,
    CoalOre,
    IronOre,
    CopperOre,
    GoldOre,
    RedstoneOre,
    DiamondOre,
    FurnaceFront,
    FurnaceSide,
    FurnaceTop,
    PumpkinFront,
    PumpkinSide,
    PumpkinTop,
    Cloud,
    Water0 = 32,
    Water1,
    Water2,
    Water3,
    Water4,
    Water5,
    Water6,
    Water7,
    Lava0 = 40,
    Lava1,
    Lava2,
    Lava3,
    Lava4,
    Lava5,
    Lava6,
    Lava7,
}

pub const WATER_FRAME_BASE: u16 = 32;
pub const LAVA_FRAME_BASE: u16 = 40;
pub const ANIMATION_FRAMES: u16 = 8;

const _: () = assert!(BlockTexture::Cloud as u16 + 1 == WATER_FRAME_BASE);
const _: () = assert!(BlockTexture::Water0 as u16 == WATER_FRAME_BASE);
const _: () = assert!(BlockTexture::Water7 as u16 == WATER_FRAME_BASE + ANIMATION_FRAMES - 1);
const _: () = assert!(BlockTexture::Lava0 as u16 == LAVA_FRAME_BASE);
const _: () = assert!(BlockTexture::Lava7 as u16 == LAVA_FRAME_BASE + ANIMATION_FRAMES - 1);
const _: () = assert!(BlockTexture::Lava7 as usize + 1 == BlockTexture::COUNT);

impl BlockTexture {
    pub const COUNT: usize = 48;

    pub const ALL: [BlockTexture; Self::COUNT] = [
        BlockTexture::Stone,
        BlockTexture::Dirt,
        BlockTexture::GrassTop,
        BlockTexture::GrassSide,
        BlockTexture::Sand,
        BlockTexture::Snow,
        BlockTexture::Gravel,
        BlockTexture::WoodTop,
        BlockTexture::WoodSide,
        BlockTexture::BirchWoodSide,
        BlockTexture::PineWoodSide,
        BlockTexture::PineWoodTop,
        BlockTexture::Leaves,
        BlockTexture::BirchLeaves,
        BlockTexture::PineLeaves,
        BlockTexture::Glass,
        BlockTexture::Planks,
        BlockTexture::Brick,
        BlockTexture::Cobblestone,
        BlockTexture::CoalOre,
        BlockTexture::IronOre,
        BlockTexture::CopperOre,
        BlockTexture::GoldOre,
        BlockTexture::RedstoneOre,
        BlockTexture::DiamondOre,
        BlockTexture::FurnaceFront,
        BlockTexture::FurnaceSide,
        BlockTexture::FurnaceTop,
        BlockTexture::PumpkinFront,
        BlockTexture::PumpkinSide,
        BlockTexture::PumpkinTop,
        BlockTexture::Cloud,
        BlockTexture::Water0,
        BlockTexture::Water1,
        BlockTexture::Water2,
        BlockTexture::Water3,
        BlockTexture::Water4,
        BlockTexture::Water5,
        BlockTexture::Water6,
        BlockTexture::Water7,
        BlockTexture::Lava0,
        BlockTexture::Lava1,
        BlockTexture::Lava2,
        BlockTexture::Lava3,
        BlockTexture::Lava4,
        BlockTexture::Lava5,
        BlockTexture::Lava6,
        BlockTexture::Lava7,
    ];

    /// Ordinal-indexed names for debug overlays.
    pub const NAMES: [&'static str; Self::COUNT] = [
        "stone",
        "dirt",
        "grass_top",
        "grass_side",
        "sand",
        "snow",
        "gravel",
        "wood_top",
        "wood_side",
        "birch_wood_side",
        "pine_wood_side",
        "pine_wood_top",
        "leaves",
        "birch_leaves",
        "pine_leaves",
        "glass",
        "planks",
        "brick",
        "cobblestone",
        "coal_ore",
        "iron_ore",
        "copper_ore",
        "gold_ore",
        "redstone_ore",
        "diamond_ore",
        "furnace_front",
        "furnace_side",
        "furnace_top",
        "pumpkin_front",
        "pumpkin_side",
        "pumpkin_top",
        "cloud",
        "water0",
        "water1",
        "water2",
        "water3",
        "water4",
        "water5",
        "water6",
        "water7",
        "lava0",
        "lava1",
        "lava2",
        "lava3",
        "lava4",
        "lava5",
        "lava6",
        "lava7",
    ];

    #[inline]
    pub fn id(self) -> u16 {
        self as u16
    }

    #[inline]
    pub fn from_u16(v: u16) -> Option<BlockTexture> {
        Self::ALL.get(v as usize).copied()
    }

    #[inline]
    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    #[inline]
    pub fn is_animated(self) -> bool {
        self as u16 >= WATER_FRAME_BASE
    }

    /// Frame `n` of this texture's animation group; static textures return themselves.
    pub fn frame(self, n: u16) -> BlockTexture {
        let base = match self as u16 {
            v if v >= LAVA_FRAME_BASE => LAVA_FRAME_BASE,
            v if v >= WATER_FRAME_BASE => WATER_FRAME_BASE,
            _ => return self,
        };
        Self::ALL[(base + n % ANIMATION_FRAMES) as usize]
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("block {0:?} has no texture")]
    NoTexture(Block),
    #[error("face index {face} is out of range for block {block:?}")]
    InvalidFace { block: Block, face: u8 },
}

pub fn try_block_texture(block: Block, face: u8) -> Result<BlockTexture, TextureError> {
    let face = Face::from_index(face).ok_or(TextureError::InvalidFace { block, face })?;
    match block.def().textures {
        FaceTextures::None => Err(TextureError::NoTexture(block)),
        FaceTextures::Uniform(tex) => Ok(tex),
        FaceTextures::Column { top, side, bottom } => Ok(match face {
            Face::Top => top,
            Face::Bottom => bottom,
            Face::East | Face::West | Face::North | Face::South => side,
        }),
        FaceTextures::Directional { front, side, top } => Ok(match face {
            Face::South => front,
            Face::Top | Face::Bottom => top,
            Face::East | Face::West | Face::North => side,
        }),
    }
}

/// Texture for one visible face. A failed lookup means the block table and
/// the renderer disagree; there is nothing sensible to draw, so the process
/// aborts after logging the diagnostic.
pub fn get_block_texture(block: Block, face: u8) -> BlockTexture {
    match try_block_texture(block, face) {
        Ok(tex) => tex,
        Err(err) => {
            log::error!("get_block_texture: {err}");
            std::process::abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_ordinal_ordered() {
        for (i, tex) in BlockTexture::ALL.iter().enumerate() {
            assert_eq!(tex.id() as usize, i);
            assert_eq!(BlockTexture::from_u16(i as u16), Some(*tex));
        }
        assert_eq!(BlockTexture::from_u16(BlockTexture::COUNT as u16), None);
    }

    #[test]
    fn frames_wrap_within_group() {
        assert_eq!(BlockTexture::Water0.frame(3), BlockTexture::Water3);
        assert_eq!(BlockTexture::Water5.frame(9), BlockTexture::Water1);
        assert_eq!(BlockTexture::Lava0.frame(7), BlockTexture::Lava7);
        assert_eq!(BlockTexture::Stone.frame(4), BlockTexture::Stone);
        assert!(!BlockTexture::Cloud.is_animated());
        assert!(BlockTexture::Lava2.is_animated());
    }
}
