use crate::texture::BlockTexture;
use crate::types::Block;

/// How a block picks a texture per face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceTextures {
    /// Never rendered.
    None,
    Uniform(BlockTexture),
    /// Distinct top and bottom, one texture for the four sides.
    Column {
        top: BlockTexture,
        side: BlockTexture,
        bottom: BlockTexture,
    },
    /// Front faces south; top doubles as bottom.
    Directional {
        front: BlockTexture,
        side: BlockTexture,
        top: BlockTexture,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct BlockDef {
    pub name: &'static str,
    pub textures: FaceTextures,
}

const fn uniform(name: &'static str, tex: BlockTexture) -> BlockDef {
    BlockDef {
        name,
        textures: FaceTextures::Uniform(tex),
    }
}

const fn water(name: &'static str) -> BlockDef {
    uniform(name, BlockTexture::Water0)
}

const fn column(
    name: &'static str,
    top: BlockTexture,
    side: BlockTexture,
    bottom: BlockTexture,
) -> BlockDef {
    BlockDef {
        name,
        textures: FaceTextures::Column { top, side, bottom },
    }
}

const fn directional(
    name: &'static str,
    front: BlockTexture,
    side: BlockTexture,
    top: BlockTexture,
) -> BlockDef {
    BlockDef {
        name,
        textures: FaceTextures::Directional { front, side, top },
    }
}

/// Indexed by block ordinal. Row order is the ordinal contract.
pub static BLOCK_TABLE: [BlockDef; Block::COUNT] = [
    BlockDef {
        name: "none",
        textures: FaceTextures::None,
    },
    water("water1"),
    water("water2"),
    water("water3"),
    water("water4"),
    water("water5"),
    water("water6"),
    water("water7"),
    water("water8"),
    water("water9"),
    water("water10"),
    water("water11"),
    water("water12"),
    water("water13"),
    water("water14"),
    water("water"),
    uniform("cloud", BlockTexture::Cloud),
    uniform("leaves", BlockTexture::Leaves),
    uniform("birch_leaves", BlockTexture::BirchLeaves),
    uniform("pine_leaves", BlockTexture::PineLeaves),
    uniform("glass", BlockTexture::Glass),
    uniform("stone", BlockTexture::Stone),
    uniform("dirt", BlockTexture::Dirt),
    column(
        "grass",
        BlockTexture::GrassTop,
        BlockTexture::GrassSide,
        BlockTexture::Dirt,
    ),
    uniform("sand", BlockTexture::Sand),
    uniform("snow", BlockTexture::Snow),
    uniform("gravel", BlockTexture::Gravel),
    column(
        "wood",
        BlockTexture::WoodTop,
        BlockTexture::WoodSide,
        BlockTexture::WoodTop,
    ),
    column(
        "birch_wood",
        BlockTexture::WoodTop,
        BlockTexture::BirchWoodSide,
        BlockTexture::WoodTop,
    ),
    column(
        "pine_wood",
        BlockTexture::PineWoodTop,
        BlockTexture::PineWoodSide,
        BlockTexture::PineWoodTop,
    ),
    uniform("planks", BlockTexture::Planks),
    uniform("brick", BlockTexture::Brick),
    uniform("cobblestone", BlockTexture::Cobblestone),
    uniform("lava", BlockTexture::Lava0),
    uniform("coal_ore", BlockTexture::CoalOre),
    uniform("iron_ore", BlockTexture::IronOre),
    uniform("copper_ore", BlockTexture::CopperOre),
    uniform("gold_ore", BlockTexture::GoldOre),
    uniform("redstone_ore", BlockTexture::RedstoneOre),
    uniform("diamond_ore", BlockTexture::DiamondOre),
    directional(
        "furnace",
        BlockTexture::FurnaceFront,
        BlockTexture::FurnaceSide,
        BlockTexture::FurnaceTop,
    ),
    directional(
        "pumpkin",
        BlockTexture::PumpkinFront,
        BlockTexture::PumpkinSide,
        BlockTexture::PumpkinTop,
    ),
];
