use std::sync::atomic::{AtomicU64, Ordering};

use cairn_blocks::Block;
use parking_lot::RwLock;

use crate::CHUNK_SIZE;

const S: i32 = CHUNK_SIZE as i32;

/// Cached attributes of one block column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    /// First z above the terrain; blocks with `z < height` are ground.
    pub height: i32,
    /// 0 for no tree, otherwise 1 oak, 2 birch, 3 pine.
    pub tree_type: u8,
    pub surface: Block,
}

impl Default for ColumnInfo {
    fn default() -> Self {
        Self {
            height: 0,
            tree_type: 0,
            surface: Block::NONE,
        }
    }
}

/// Anything that can answer column queries for the generator layers.
pub trait ColumnSource {
    fn column(&self, x: i32, y: i32) -> ColumnInfo;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HeightmapStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub populated: usize,
}

struct Slot {
    stamp: Option<(i32, i32)>,
    columns: Box<[ColumnInfo]>,
}

/// Wraparound cache of per-column attributes, one slot per chunk column.
///
/// `map_size x map_size` slots addressed by `(cx & mask, cy & mask)`. Each
/// slot carries the chunk column it was filled for, and every read checks
/// that stamp under the slot's read lock, so an aliased slot is recomputed
/// rather than served stale. Aliasing therefore costs time, never values.
pub struct Heightmap {
    slots: Box<[RwLock<Slot>]>,
    map_size: usize,
    mask: i32,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Heightmap {
    pub fn new(map_size: usize) -> Self {
        let map_size = map_size.max(1).next_power_of_two();
        let slots = (0..map_size * map_size)
            .map(|_| {
                RwLock::new(Slot {
                    stamp: None,
                    columns: vec![ColumnInfo::default(); CHUNK_SIZE * CHUNK_SIZE].into_boxed_slice(),
                })
            })
            .collect();
        Self {
            slots,
            map_size,
            mask: map_size as i32 - 1,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn map_size(&self) -> usize {
        self.map_size
    }

    #[inline]
    fn slot(&self, cx: i32, cy: i32) -> &RwLock<Slot> {
        let i = (cx & self.mask) as usize * self.map_size + (cy & self.mask) as usize;
        &self.slots[i]
    }

    #[inline]
    fn local_index(lx: i32, ly: i32) -> usize {
        ly as usize * CHUNK_SIZE + lx as usize
    }

    /// Ensure the slot for chunk column `(cx, cy)` holds that column's data.
    /// `fill` receives the chunk column and a `CHUNK_SIZE^2` buffer indexed
    /// `ly * CHUNK_SIZE + lx`. Returns `true` when it recomputed.
    pub fn populate<F>(&self, cx: i32, cy: i32, fill: F) -> bool
    where
        F: FnOnce(i32, i32, &mut [ColumnInfo]),
    {
        let slot = self.slot(cx, cy);
        if slot.read().stamp == Some((cx, cy)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let mut w = slot.write();
        if w.stamp == Some((cx, cy)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        self.refill(&mut w, cx, cy, fill);
        true
    }

    /// Column at block `(x, y)`, populating its slot first if needed.
    pub fn column<F>(&self, x: i32, y: i32, fill: F) -> ColumnInfo
    where
        F: FnOnce(i32, i32, &mut [ColumnInfo]),
    {
        let (cx, cy) = (x.div_euclid(S), y.div_euclid(S));
        let i = Self::local_index(x.rem_euclid(S), y.rem_euclid(S));
        let slot = self.slot(cx, cy);
        {
            let r = slot.read();
            if r.stamp == Some((cx, cy)) {
                return r.columns[i];
            }
        }
        let mut w = slot.write();
        if w.stamp != Some((cx, cy)) {
            self.refill(&mut w, cx, cy, fill);
        }
        w.columns[i]
    }

    fn refill<F>(&self, slot: &mut Slot, cx: i32, cy: i32, fill: F)
    where
        F: FnOnce(i32, i32, &mut [ColumnInfo]),
    {
        if let Some((ox, oy)) = slot.stamp {
            self.evictions.fetch_add(1, Ordering::Relaxed);
            log::trace!("heightmap slot ({ox},{oy}) evicted by ({cx},{cy})");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        fill(cx, cy, &mut slot.columns);
        slot.stamp = Some((cx, cy));
    }

    /// Whether chunk column `(cx, cy)` is currently resident.
    pub fn is_cached(&self, cx: i32, cy: i32) -> bool {
        self.slot(cx, cy).read().stamp == Some((cx, cy))
    }

    pub fn clear(&self) {
        for slot in self.slots.iter() {
            slot.write().stamp = None;
        }
    }

    pub fn stats(&self) -> HeightmapStats {
        HeightmapStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            populated: self.slots.iter().filter(|s| s.read().stamp.is_some()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    fn stamp_fill(cx: i32, cy: i32, cols: &mut [ColumnInfo]) {
        for (i, c) in cols.iter_mut().enumerate() {
            let (lx, ly) = ((i % CHUNK_SIZE) as i32, (i / CHUNK_SIZE) as i32);
            c.height = (cx * S + lx) * 1000 + (cy * S + ly);
        }
    }

    #[test]
    fn populate_is_memoized() {
        let hm = Heightmap::new(4);
        let calls = AtomicUsize::new(0);
        let fill = |cx, cy, cols: &mut [ColumnInfo]| {
            calls.fetch_add(1, Ordering::Relaxed);
            stamp_fill(cx, cy, cols);
        };
        assert!(hm.populate(2, -3, fill));
        assert!(!hm.populate(2, -3, fill));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert!(hm.is_cached(2, -3));
        let s = hm.stats();
        assert_eq!((s.hits, s.misses, s.evictions, s.populated), (1, 1, 0, 1));
    }

    #[test]
    fn aliased_columns_recompute_instead_of_going_stale() {
        let hm = Heightmap::new(2);
        // (0,0) and (2,0) share a slot when map_size is 2.
        assert_eq!(hm.column(5, 7, stamp_fill).height, 5 * 1000 + 7);
        assert_eq!(hm.column(2 * S + 5, 7, stamp_fill).height, (2 * S + 5) * 1000 + 7);
        assert!(!hm.is_cached(0, 0));
        assert_eq!(hm.column(5, 7, stamp_fill).height, 5 * 1000 + 7);
        assert_eq!(hm.stats().evictions, 2);
    }

    #[test]
    fn negative_columns_index_locally() {
        let hm = Heightmap::new(8);
        assert_eq!(hm.column(-1, -33, stamp_fill).height, -1000 - 33);
        assert!(hm.is_cached(-1, -2));
    }

    #[test]
    fn non_power_of_two_rounds_up() {
        assert_eq!(Heightmap::new(5).map_size(), 8);
        assert_eq!(Heightmap::new(0).map_size(), 1);
    }

    #[test]
    fn concurrent_readers_agree() {
        let hm = Arc::new(Heightmap::new(1));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let hm = Arc::clone(&hm);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let x = (i * 37 + t * 11) % 256 - 128;
                        let y = (i * 13 + t * 5) % 256 - 128;
                        assert_eq!(hm.column(x, y, stamp_fill).height, x * 1000 + y);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
