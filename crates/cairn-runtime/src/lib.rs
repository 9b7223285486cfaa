//! Concurrency layer: per-key chunk locks, the re-centering world map and
//! the chunk streaming worker pool.
#![forbid(unsafe_code)]

pub mod keyed_mutex;
pub mod world_map;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use cairn_chunk::{Chunk, ChunkOccupancy, generate_chunk_buffer};
use cairn_world::{ChunkCoord, WorldGen};
use crossbeam_channel::{Receiver, Sender, unbounded};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use thiserror::Error;

pub use keyed_mutex::{KeyGuard, KeyedMutex};
pub use world_map::{MapError, RefreshStats, WorldMap};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("building worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub chunk: Chunk,
    pub occupancy: ChunkOccupancy,
    pub t_gen_ms: u32,
    pub heightmap_miss: bool,
    pub job_id: u64,
}

fn process_chunk_job(
    job: ChunkJob,
    worldgen: &WorldGen,
    locks: &KeyedMutex<ChunkCoord>,
    tx: &Sender<JobOut>,
) {
    let ChunkJob { coord, job_id } = job;
    let t0 = Instant::now();
    let generated = {
        let _key = locks.lock(coord);
        generate_chunk_buffer(worldgen, coord)
    };
    let t_gen_ms = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    let out = JobOut {
        coord,
        chunk: generated.chunk,
        occupancy: generated.occupancy,
        t_gen_ms,
        heightmap_miss: generated.stats.heightmap_miss,
        job_id,
    };
    if tx.send(out).is_err() {
        log::debug!("runtime result receiver gone; dropping chunk {coord:?}");
    }
}

/// Background chunk generation. Jobs go in through [`Runtime::submit`];
/// finished chunks come back, in completion order, via
/// [`Runtime::drain_results`].
pub struct Runtime {
    job_tx: Sender<ChunkJob>,
    res_rx: Receiver<JobOut>,
    _pool: ThreadPool,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    next_job_id: AtomicU64,
    pub workers: usize,
}

impl Runtime {
    /// `workers == 0` picks the machine's available parallelism.
    pub fn new(
        worldgen: Arc<WorldGen>,
        locks: Arc<KeyedMutex<ChunkCoord>>,
        workers: usize,
    ) -> Result<Self, RuntimeError> {
        let (job_tx, job_rx) = unbounded::<ChunkJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();
        let workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            workers
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cairn-gen-{i}"))
            .build()?;

        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let worldgen = Arc::clone(&worldgen);
            let locks = Arc::clone(&locks);
            let queued = Arc::clone(&queued);
            let inflight = Arc::clone(&inflight);
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    process_chunk_job(job, worldgen.as_ref(), locks.as_ref(), &tx);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                }
            });
        }
        log::info!("runtime started with {workers} generation workers");

        Ok(Self {
            job_tx,
            res_rx,
            _pool: pool,
            queued,
            inflight,
            next_job_id: AtomicU64::new(1),
            workers,
        })
    }

    pub fn submit(&self, job: ChunkJob) {
        self.queued.fetch_add(1, Ordering::Relaxed);
        if self.job_tx.send(job).is_err() {
            self.queued.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Queue `coord` under a fresh job id and return that id.
    pub fn request(&self, coord: ChunkCoord) -> u64 {
        let job_id = self.next_job_id.fetch_add(1, Ordering::Relaxed);
        self.submit(ChunkJob { coord, job_id });
        job_id
    }

    /// Queue every chunk within `radius` chunks of `center` (a cube),
    /// nearest first. Returns the number of jobs queued.
    pub fn request_around(&self, center: ChunkCoord, radius: i32) -> usize {
        let r = radius.max(0);
        let mut coords = Vec::with_capacity(((2 * r + 1) as usize).pow(3));
        for dz in -r..=r {
            for dy in -r..=r {
                for dx in -r..=r {
                    coords.push(center.offset(dx, dy, dz));
                }
            }
        }
        coords.sort_by_key(|c| c.distance_sq(center));
        for &c in &coords {
            self.request(c);
        }
        coords.len()
    }

    pub fn drain_results(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    pub fn recv_result_timeout(&self, timeout: Duration) -> Option<JobOut> {
        self.res_rx.recv_timeout(timeout).ok()
    }

    /// `(queued, inflight)`.
    pub fn queue_debug_counts(&self) -> (usize, usize) {
        (
            self.queued.load(Ordering::Relaxed),
            self.inflight.load(Ordering::Relaxed),
        )
    }
}
