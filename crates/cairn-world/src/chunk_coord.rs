use cairn_geom::IVec3;
use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

const S: i32 = CHUNK_SIZE as i32;

/// Chunk address: block coordinate floor-divided by `CHUNK_SIZE` per axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// The chunk holding block `pos`; negative coordinates round toward -inf.
    #[inline]
    pub fn containing(pos: IVec3) -> Self {
        let c = pos.div_euclid(S);
        Self::new(c.x, c.y, c.z)
    }

    /// Local offset of `pos` inside its chunk, each axis in `0..CHUNK_SIZE`.
    #[inline]
    pub fn local_of(pos: IVec3) -> IVec3 {
        pos.rem_euclid(S)
    }

    /// Minimum block coordinate of this chunk.
    #[inline]
    pub fn origin(self) -> IVec3 {
        IVec3::new(self.cx * S, self.cy * S, self.cz * S)
    }

    #[inline]
    pub fn column(self) -> (i32, i32) {
        (self.cx, self.cy)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        IVec3::new(self.cx, self.cy, self.cz).distance_sq(IVec3::new(other.cx, other.cy, other.cz))
    }
}

impl From<IVec3> for ChunkCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ChunkCoord> for IVec3 {
    fn from(c: ChunkCoord) -> Self {
        IVec3::new(c.cx, c.cy, c.cz)
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
