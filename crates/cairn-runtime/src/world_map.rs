use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cairn_blocks::Block;
use cairn_chunk::{Chunk, generate_chunk};
use cairn_geom::IVec3;
use cairn_world::{ChunkCoord, WorldGen};
use parking_lot::RwLock;
use rayon::prelude::*;
use thiserror::Error;

use crate::keyed_mutex::KeyedMutex;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map extent {0} is not a power of two")]
    InvalidExtent(usize),
    #[error("chunk {0:?} lies outside the current window")]
    OutsideWindow(ChunkCoord),
    #[error("chunk {0:?} was replaced while being edited")]
    Evicted(ChunkCoord),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshStats {
    pub regenerated: usize,
    pub reused: usize,
}

#[derive(Clone, Copy, Debug)]
struct Window {
    center: Option<ChunkCoord>,
    origin: ChunkCoord,
}

/// Fixed-capacity cube of chunks following a moving center.
///
/// Chunk `c` lives in slot `c mod extent` per axis. A slot is valid for `c`
/// only while the chunk stored there is tagged with `c`; anything else means
/// the slot must be regenerated before it can serve `c`. Slot contents are
/// only written while holding the chunk's key in the shared [`KeyedMutex`].
/// Window moves hold `window_gate` exclusively; slot writers hold it shared,
/// so a writer's window check stays valid until its write lands.
pub struct WorldMap {
    worldgen: Arc<WorldGen>,
    locks: Arc<KeyedMutex<ChunkCoord>>,
    extent: i32,
    slots: Box<[RwLock<Option<Chunk>>]>,
    window: RwLock<Window>,
    window_gate: RwLock<()>,
    generated: AtomicU64,
}

impl WorldMap {
    pub fn new(
        worldgen: Arc<WorldGen>,
        extent: usize,
        locks: Arc<KeyedMutex<ChunkCoord>>,
    ) -> Result<Self, MapError> {
        if !extent.is_power_of_two() || extent > 1024 {
            return Err(MapError::InvalidExtent(extent));
        }
        let slots = (0..extent * extent * extent).map(|_| RwLock::new(None)).collect();
        Ok(Self {
            worldgen,
            locks,
            extent: extent as i32,
            slots,
            window: RwLock::new(Window {
                center: None,
                origin: ChunkCoord::default(),
            }),
            window_gate: RwLock::new(()),
            generated: AtomicU64::new(0),
        })
    }

    #[inline]
    pub fn extent(&self) -> usize {
        self.extent as usize
    }

    #[inline]
    pub fn worldgen(&self) -> &Arc<WorldGen> {
        &self.worldgen
    }

    /// Minimum chunk coordinate of the current window.
    pub fn origin(&self) -> ChunkCoord {
        self.window.read().origin
    }

    pub fn center(&self) -> Option<ChunkCoord> {
        self.window.read().center
    }

    /// Chunks generated by this map so far.
    pub fn chunks_generated(&self) -> u64 {
        self.generated.load(Ordering::Relaxed)
    }

    #[inline]
    fn slot_index(&self, c: ChunkCoord) -> usize {
        let m = self.extent - 1;
        let e = self.extent as usize;
        ((c.cz & m) as usize * e + (c.cy & m) as usize) * e + (c.cx & m) as usize
    }

    #[inline]
    fn slot(&self, c: ChunkCoord) -> &RwLock<Option<Chunk>> {
        &self.slots[self.slot_index(c)]
    }

    fn origin_for(&self, center: ChunkCoord) -> ChunkCoord {
        let half = self.extent / 2;
        center.offset(-half, -half, -half)
    }

    pub fn in_window(&self, c: ChunkCoord) -> bool {
        let w = self.window.read();
        w.center.is_some() && Self::within(w.origin, self.extent, c)
    }

    #[inline]
    fn within(origin: ChunkCoord, extent: i32, c: ChunkCoord) -> bool {
        let r = 0..extent;
        r.contains(&(c.cx - origin.cx)) && r.contains(&(c.cy - origin.cy)) && r.contains(&(c.cz - origin.cz))
    }

    /// Whether the slot for `c` currently holds `c`.
    pub fn is_resident(&self, c: ChunkCoord) -> bool {
        self.slot(c).read().as_ref().is_some_and(|ch| ch.coord == c)
    }

    /// Move the window to `center` and list the slots that no longer hold
    /// the chunk they should. `None` when the center is unchanged.
    fn move_window(&self, center: ChunkCoord) -> Option<Vec<ChunkCoord>> {
        if self.window.read().center == Some(center) {
            return None;
        }
        let origin = self.origin_for(center);
        *self.window.write() = Window {
            center: Some(center),
            origin,
        };
        let e = self.extent;
        let mut stale = Vec::new();
        for dz in 0..e {
            for dy in 0..e {
                for dx in 0..e {
                    let c = origin.offset(dx, dy, dz);
                    if !self.is_resident(c) {
                        stale.push(c);
                    }
                }
            }
        }
        // Nearest first so readers waiting on the center get it early.
        stale.sort_by_key(|c| c.distance_sq(center));
        Some(stale)
    }

    /// Move the window so it is centered on `center`, regenerating exactly
    /// the slots whose chunk no longer matches.
    ///
    /// Same center is a no-op, checked against the recorded center only. After
    /// [`WorldMap::recenter`] to the same center the window is considered
    /// current, so any gaps it left stay empty until filled by
    /// [`WorldMap::ensure_chunk`], [`WorldMap::install`] or
    /// [`WorldMap::set_block`].
    pub fn refresh(&self, center: ChunkCoord) -> RefreshStats {
        let _gate = self.window_gate.write();
        let Some(stale) = self.move_window(center) else {
            return RefreshStats::default();
        };
        let total = self.slots.len();
        let regenerated = stale
            .par_iter()
            .map(|&c| usize::from(self.load(c)))
            .sum::<usize>();
        let reused = total - stale.len();
        log::debug!(
            "world map refresh center={center:?} origin={:?} regenerated={regenerated} reused={reused}",
            self.origin()
        );
        RefreshStats {
            regenerated,
            reused,
        }
    }

    /// Move the window without generating anything; stale slots are left
    /// for [`WorldMap::ensure_chunk`] callers. Returns how many are stale.
    pub fn recenter(&self, center: ChunkCoord) -> usize {
        let _gate = self.window_gate.write();
        self.move_window(center).map_or(0, |stale| stale.len())
    }

    /// Generate `c` into its slot unless already resident. Returns `true`
    /// when this call did the generation.
    pub fn ensure_chunk(&self, c: ChunkCoord) -> Result<bool, MapError> {
        let _gate = self.window_gate.read();
        if !self.in_window(c) {
            return Err(MapError::OutsideWindow(c));
        }
        Ok(self.load(c))
    }

    fn load(&self, c: ChunkCoord) -> bool {
        let _key = self.locks.lock(c);
        self.load_locked(c)
    }

    /// Caller holds the key for `c`.
    fn load_locked(&self, c: ChunkCoord) -> bool {
        let mut slot = self.slot(c).write();
        if slot.as_ref().is_some_and(|ch| ch.coord == c) {
            return false;
        }
        let chunk = slot.get_or_insert_with(|| Chunk::new(c));
        generate_chunk(&self.worldgen, chunk, c);
        self.generated.fetch_add(1, Ordering::Relaxed);
        log::trace!("world map generated {c:?}");
        true
    }

    /// Store a chunk produced elsewhere (e.g. by the streaming runtime).
    pub fn install(&self, chunk: Chunk) -> Result<(), MapError> {
        let c = chunk.coord;
        let _gate = self.window_gate.read();
        if !self.in_window(c) {
            return Err(MapError::OutsideWindow(c));
        }
        let _key = self.locks.lock(c);
        *self.slot(c).write() = Some(chunk);
        Ok(())
    }

    /// Block at `pos` if its chunk is resident.
    pub fn block(&self, pos: IVec3) -> Option<Block> {
        let c = ChunkCoord::containing(pos);
        let slot = self.slot(c).read();
        slot.as_ref().and_then(|ch| ch.get_world(pos))
    }

    /// Overwrite the block at `pos`, loading its chunk first if needed.
    /// Returns the previous block.
    pub fn set_block(&self, pos: IVec3, block: Block) -> Result<Block, MapError> {
        let c = ChunkCoord::containing(pos);
        let _gate = self.window_gate.read();
        if !self.in_window(c) {
            return Err(MapError::OutsideWindow(c));
        }
        let _key = self.locks.lock(c);
        self.load_locked(c);
        let mut slot = self.slot(c).write();
        slot.as_mut()
            .and_then(|ch| ch.set_world(pos, block))
            .ok_or(MapError::Evicted(c))
    }

    /// Run `f` on chunk `c` under its slot's read lock, if resident.
    pub fn with_chunk<R>(&self, c: ChunkCoord, f: impl FnOnce(&Chunk) -> R) -> Option<R> {
        let slot = self.slot(c).read();
        slot.as_ref().filter(|ch| ch.coord == c).map(f)
    }

    /// Coordinates of every resident chunk inside the window.
    pub fn resident(&self) -> Vec<ChunkCoord> {
        let w = *self.window.read();
        if w.center.is_none() {
            return Vec::new();
        }
        self.slots
            .iter()
            .filter_map(|s| s.read().as_ref().map(|ch| ch.coord))
            .filter(|&c| Self::within(w.origin, self.extent, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_world::WorldGenParams;

    fn map(extent: usize) -> WorldMap {
        WorldMap::new(
            Arc::new(WorldGen::new(WorldGenParams::default())),
            extent,
            Arc::new(KeyedMutex::new()),
        )
        .unwrap()
    }

    #[test]
    fn rejects_non_power_of_two_extent() {
        let wg = Arc::new(WorldGen::new(WorldGenParams::default()));
        let locks = Arc::new(KeyedMutex::new());
        assert_eq!(
            WorldMap::new(wg, 3, locks).err(),
            Some(MapError::InvalidExtent(3))
        );
    }

    #[test]
    fn slot_index_wraps_negative_coordinates() {
        let m = map(4);
        assert_eq!(m.slot_index(ChunkCoord::new(-1, 0, 0)), m.slot_index(ChunkCoord::new(3, 0, 0)));
        assert_ne!(m.slot_index(ChunkCoord::new(-1, 0, 0)), m.slot_index(ChunkCoord::new(0, 0, 0)));
        let mut seen = std::collections::HashSet::new();
        for z in -2..2 {
            for y in -2..2 {
                for x in -2..2 {
                    assert!(seen.insert(m.slot_index(ChunkCoord::new(x, y, z))));
                }
            }
        }
    }

    #[test]
    fn block_reads_none_before_any_refresh() {
        let m = map(2);
        assert_eq!(m.block(IVec3::ZERO), None);
        assert_eq!(
            m.ensure_chunk(ChunkCoord::default()),
            Err(MapError::OutsideWindow(ChunkCoord::default()))
        );
        assert!(m.resident().is_empty());
    }
}
