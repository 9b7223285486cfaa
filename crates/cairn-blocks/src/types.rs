use std::fmt;

use thiserror::Error;

use crate::table::{BLOCK_TABLE, BlockDef};

/// A block material. The ordinal is a contract: `NONE` is zero, the water
/// levels are contiguous right after it, and everything a body can pass
/// through sorts at or below `CLOUD`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Block(u8);

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown block ordinal {0}")]
pub struct UnknownBlock(pub u8);

impl Block {
    pub const NONE: Block = Block(0);
    pub const WATER1: Block = Block(1);
    pub const WATER14: Block = Block(14);
    pub const WATER: Block = Block(15);
    pub const CLOUD: Block = Block(16);
    pub const LEAVES: Block = Block(17);
    pub const BIRCH_LEAVES: Block = Block(18);
    pub const PINE_LEAVES: Block = Block(19);
    pub const GLASS: Block = Block(20);
    pub const STONE: Block = Block(21);
    pub const DIRT: Block = Block(22);
    pub const GRASS: Block = Block(23);
    pub const SAND: Block = Block(24);
    pub const SNOW: Block = Block(25);
    pub const GRAVEL: Block = Block(26);
    pub const WOOD: Block = Block(27);
    pub const BIRCH_WOOD: Block = Block(28);
    pub const PINE_WOOD: Block = Block(29);
    pub const PLANKS: Block = Block(30);
    pub const BRICK: Block = Block(31);
    pub const COBBLESTONE: Block = Block(32);
    pub const LAVA: Block = Block(33);
    pub const COAL_ORE: Block = Block(34);
    pub const IRON_ORE: Block = Block(35);
    pub const COPPER_ORE: Block = Block(36);
    pub const GOLD_ORE: Block = Block(37);
    pub const REDSTONE_ORE: Block = Block(38);
    pub const DIAMOND_ORE: Block = Block(39);
    pub const FURNACE: Block = Block(40);
    pub const PUMPKIN: Block = Block(41);

    pub const COUNT: usize = 42;
    pub const ORE_COUNT: u8 = 6;

    #[inline]
    pub const fn from_u8(v: u8) -> Option<Block> {
        if (v as usize) < Self::COUNT {
            Some(Block(v))
        } else {
            None
        }
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Ore variant `i % 6`, in table order (coal first).
    #[inline]
    pub const fn ore(i: u8) -> Block {
        Block(Self::COAL_ORE.0 + i % Self::ORE_COUNT)
    }

    #[inline]
    pub const fn water(level: WaterLevel) -> Block {
        Block(level.get())
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        self.0 >= Self::WATER1.0 && self.0 <= Self::WATER.0
    }

    #[inline]
    pub const fn can_move_through(self) -> bool {
        self.0 <= Self::CLOUD.0
    }

    #[inline]
    pub const fn can_see_through(self) -> bool {
        self.0 <= Self::GLASS.0
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 >= Self::STONE.0
    }

    #[inline]
    pub const fn is_ore(self) -> bool {
        self.0 >= Self::COAL_ORE.0 && self.0 <= Self::DIAMOND_ORE.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn water_level(self) -> Option<WaterLevel> {
        if self.is_water() {
            Some(WaterLevel(self.0))
        } else {
            None
        }
    }

    pub fn category(self) -> BlockCategory {
        match self {
            Block::NONE => BlockCategory::Empty,
            b if b.is_water() => BlockCategory::Water(WaterLevel(b.0)),
            Block::CLOUD => BlockCategory::Cloud,
            b if b.can_see_through() => BlockCategory::Translucent,
            _ => BlockCategory::Solid,
        }
    }

    #[inline]
    pub fn def(self) -> &'static BlockDef {
        &BLOCK_TABLE[self.0 as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn by_name(name: &str) -> Option<Block> {
        BLOCK_TABLE
            .iter()
            .position(|d| d.name == name)
            .map(|i| Block(i as u8))
    }

    pub fn all() -> impl Iterator<Item = Block> {
        (0..Self::COUNT as u8).map(Block)
    }
}

impl TryFrom<u8> for Block {
    type Error = UnknownBlock;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Block::from_u8(value).ok_or(UnknownBlock(value))
    }
}

impl From<Block> for u8 {
    fn from(value: Block) -> Self {
        value.0
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block({}:{})", self.0, self.name())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fill level of a water block: 1..=14 partial, 15 is a full source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaterLevel(u8);

impl WaterLevel {
    pub const MIN: WaterLevel = WaterLevel(1);
    pub const SOURCE: WaterLevel = WaterLevel(15);

    #[inline]
    pub const fn new(level: u8) -> Option<WaterLevel> {
        if level >= Self::MIN.0 && level <= Self::SOURCE.0 {
            Some(WaterLevel(level))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_source(self) -> bool {
        self.0 == Self::SOURCE.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    Empty,
    Water(WaterLevel),
    Cloud,
    /// Visible through but not passable (foliage, glass).
    Translucent,
    Solid,
}

impl BlockCategory {
    #[inline]
    pub fn can_move_through(self) -> bool {
        matches!(
            self,
            BlockCategory::Empty | BlockCategory::Water(_) | BlockCategory::Cloud
        )
    }

    #[inline]
    pub fn can_see_through(self) -> bool {
        !matches!(self, BlockCategory::Solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_agrees_with_ordinal_predicates() {
        for b in Block::all() {
            let cat = b.category();
            assert_eq!(cat.can_move_through(), b.can_move_through(), "{b:?}");
            assert_eq!(cat.can_see_through(), b.can_see_through(), "{b:?}");
            assert_eq!(matches!(cat, BlockCategory::Water(_)), b.is_water(), "{b:?}");
        }
    }

    #[test]
    fn water_levels_map_to_ordinals() {
        for level in 1..=15u8 {
            let wl = WaterLevel::new(level).unwrap();
            let b = Block::water(wl);
            assert_eq!(b.id(), level);
            assert_eq!(b.water_level(), Some(wl));
        }
        assert_eq!(Block::water(WaterLevel::SOURCE), Block::WATER);
        assert!(WaterLevel::new(0).is_none());
        assert!(WaterLevel::new(16).is_none());
    }
}
