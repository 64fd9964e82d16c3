use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use hashbrown::HashSet;
use lantern_blocks::BlockId;
use lantern_chunk::{Chunk, ChunkStore};
use lantern_geom::{CHUNK_SIZE_X, CHUNK_SIZE_Y, CHUNK_SIZE_Z, ChunkPos, ChunkRegion};
use log::{debug, trace};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::provider::WorldProviderCoreImpl;

/// Produces the initial contents of a chunk. Runs on worker threads.
pub trait ChunkGenerator: Send + Sync {
    fn generate(&self, pos: ChunkPos, extra_slots: usize) -> Chunk;
}

/// `fill` at and below `surface`, air above.
#[derive(Clone, Copy, Debug)]
pub struct FlatGenerator {
    surface: i32,
    fill: BlockId,
}

impl FlatGenerator {
    pub fn new(surface: i32, fill: BlockId) -> Self {
        Self { surface, fill }
    }

    pub fn surface(&self) -> i32 {
        self.surface
    }

    pub fn fill(&self) -> BlockId {
        self.fill
    }
}

impl ChunkGenerator for FlatGenerator {
    fn generate(&self, pos: ChunkPos, extra_slots: usize) -> Chunk {
        let base_y = pos.min_block().y;
        if base_y + CHUNK_SIZE_Y as i32 - 1 <= self.surface {
            return Chunk::filled(pos, self.fill, extra_slots);
        }
        let mut chunk = Chunk::new(pos, extra_slots);
        let solid_rows = (self.surface - base_y + 1).clamp(0, CHUNK_SIZE_Y as i32) as usize;
        for y in 0..solid_rows {
            for z in 0..CHUNK_SIZE_Z {
                for x in 0..CHUNK_SIZE_X {
                    chunk.set_block(x, y, z, self.fill);
                }
            }
        }
        chunk
    }
}

/// Generates chunks on a worker pool and hands them back to the
/// simulation thread, which lights and publishes them.
pub struct ChunkLoader {
    pool: ThreadPool,
    generator: Arc<dyn ChunkGenerator>,
    tx: Sender<Chunk>,
    rx: Receiver<Chunk>,
    pending: HashSet<ChunkPos>,
    extra_slots: usize,
}

impl ChunkLoader {
    /// `workers == 0` lets rayon size the pool.
    pub fn new(
        generator: Arc<dyn ChunkGenerator>,
        workers: usize,
        extra_slots: usize,
    ) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lantern-gen-{i}"))
            .build()?;
        let (tx, rx) = unbounded();
        Ok(Self {
            pool,
            generator,
            tx,
            rx,
            pending: HashSet::new(),
            extra_slots,
        })
    }

    /// Queues generation of `pos`. Returns false if it is already queued.
    pub fn request(&mut self, pos: ChunkPos) -> bool {
        if !self.pending.insert(pos) {
            return false;
        }
        let generator = Arc::clone(&self.generator);
        let tx = self.tx.clone();
        let extra_slots = self.extra_slots;
        self.pool.spawn(move || {
            let chunk = generator.generate(pos, extra_slots);
            // The loader owns a sender, so this only fails while it is dropping.
            let _ = tx.send(chunk);
        });
        trace!(target: "world", "requested chunk {:?}", pos);
        true
    }

    /// Queues every chunk of `region` that is not loaded or pending, nearest
    /// the centre first.
    pub fn request_region(&mut self, region: ChunkRegion, loaded: &ChunkStore) -> usize {
        let center = ChunkPos::new(
            (region.min.cx + region.max.cx) / 2,
            (region.min.cy + region.max.cy) / 2,
            (region.min.cz + region.max.cz) / 2,
        );
        let mut wanted: Vec<ChunkPos> = region.iter().filter(|pos| !loaded.contains(*pos)).collect();
        wanted.sort_by_key(|pos| pos.distance_sq(center));
        wanted.into_iter().filter(|pos| self.request(*pos)).count()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Publishes every chunk that has finished generating, without blocking.
    pub fn drain_into(&mut self, world: &mut WorldProviderCoreImpl<ChunkStore>) -> Vec<ChunkPos> {
        let mut loaded = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(chunk) => loaded.push(self.publish(world, chunk)),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        loaded
    }

    /// Blocks until every requested chunk has been published.
    pub fn finish_into(&mut self, world: &mut WorldProviderCoreImpl<ChunkStore>) -> Vec<ChunkPos> {
        let mut loaded = Vec::new();
        while !self.pending.is_empty() {
            match self.rx.recv() {
                Ok(chunk) => loaded.push(self.publish(world, chunk)),
                Err(_) => break,
            }
        }
        debug!(target: "world", "loader idle after {} chunks", loaded.len());
        loaded
    }

    fn publish(&mut self, world: &mut WorldProviderCoreImpl<ChunkStore>, chunk: Chunk) -> ChunkPos {
        self.pending.remove(&chunk.pos());
        world.insert_chunk(chunk)
    }
}
