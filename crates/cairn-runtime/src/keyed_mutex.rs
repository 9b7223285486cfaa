use std::hash::{BuildHasher, Hash};
use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashSet;
use hashbrown::hash_map::DefaultHashBuilder;
use parking_lot::{Condvar, Mutex};

const DEFAULT_SHARDS: usize = 64;

struct Shard<K> {
    held: Mutex<HashSet<K>>,
    released: Condvar,
}

/// Per-key blocking locks over an open key space.
///
/// Keys hash into a fixed set of shards. A shard's mutex only guards the
/// bookkeeping of which keys are held; the work done under a [`KeyGuard`]
/// runs without it, so distinct keys proceed in parallel even when they
/// share a shard. Waiters are woken by broadcast and re-check their key.
/// Acquisition order among waiters is not FIFO.
pub struct KeyedMutex<K, S = DefaultHashBuilder> {
    shards: Box<[Shard<K>]>,
    hasher: S,
    contended: AtomicU64,
}

impl<K: Eq + Hash + Clone> KeyedMutex<K> {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    /// `shards` is rounded up to a power of two.
    pub fn with_shards(shards: usize) -> Self {
        let n = shards.max(1).next_power_of_two();
        Self {
            shards: (0..n)
                .map(|_| Shard {
                    held: Mutex::new(HashSet::new()),
                    released: Condvar::new(),
                })
                .collect(),
            hasher: DefaultHashBuilder::default(),
            contended: AtomicU64::new(0),
        }
    }
}

impl<K: Eq + Hash + Clone> Default for KeyedMutex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone, S: BuildHasher> KeyedMutex<K, S> {
    #[inline]
    fn shard(&self, key: &K) -> &Shard<K> {
        let h = self.hasher.hash_one(key) as usize;
        &self.shards[h & (self.shards.len() - 1)]
    }

    /// Blocks until no other guard holds `key`. There is no timeout.
    pub fn lock(&self, key: K) -> KeyGuard<'_, K> {
        let shard = self.shard(&key);
        let mut held = shard.held.lock();
        if held.contains(&key) {
            self.contended.fetch_add(1, Ordering::Relaxed);
            while held.contains(&key) {
                shard.released.wait(&mut held);
            }
        }
        held.insert(key.clone());
        KeyGuard { shard, key }
    }

    pub fn try_lock(&self, key: K) -> Option<KeyGuard<'_, K>> {
        let shard = self.shard(&key);
        let mut held = shard.held.lock();
        if !held.insert(key.clone()) {
            return None;
        }
        Some(KeyGuard { shard, key })
    }

    pub fn is_held(&self, key: &K) -> bool {
        self.shard(key).held.lock().contains(key)
    }

    pub fn held_count(&self) -> usize {
        self.shards.iter().map(|s| s.held.lock().len()).sum()
    }

    /// Acquisitions that had to wait for another holder.
    pub fn contended(&self) -> u64 {
        self.contended.load(Ordering::Relaxed)
    }
}

/// Holds one key; releasing happens on drop, including during unwinding.
pub struct KeyGuard<'a, K: Eq + Hash> {
    shard: &'a Shard<K>,
    key: K,
}

impl<K: Eq + Hash> KeyGuard<'_, K> {
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: Eq + Hash> Drop for KeyGuard<'_, K> {
    fn drop(&mut self) {
        let mut held = self.shard.held.lock();
        held.remove(&self.key);
        drop(held);
        self.shard.released.notify_all();
    }
}
