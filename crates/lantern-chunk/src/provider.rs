use hashbrown::HashMap;
use lantern_geom::ChunkPos;

use crate::chunk::Chunk;

/// Storage boundary the lighting core reads through. Implementors own the
/// chunks; nothing downstream creates or destroys them.
pub trait ChunkProvider {
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk>;

    fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk>;

    fn is_chunk_ready(&self, pos: ChunkPos) -> bool {
        self.chunk(pos)
            .is_some_and(|c| c.is_ready() && !c.is_disposed())
    }

    fn all_chunks(&self) -> Box<dyn Iterator<Item = &Chunk> + '_>;
}

/// Loaded chunks keyed by position.
#[derive(Default)]
pub struct ChunkStore {
    chunks: HashMap<ChunkPos, Chunk>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `chunk`, disposing and returning any chunk it replaces.
    pub fn insert(&mut self, chunk: Chunk) -> Option<Chunk> {
        let pos = chunk.pos();
        log::trace!(target: "chunks", "insert {:?}", pos);
        self.chunks.insert(pos, chunk).map(|mut old| {
            old.dispose();
            old
        })
    }

    /// Removes and disposes the chunk at `pos`.
    pub fn remove(&mut self, pos: ChunkPos) -> Option<Chunk> {
        let mut chunk = self.chunks.remove(&pos)?;
        log::trace!(target: "chunks", "evict {:?}", pos);
        chunk.dispose();
        Some(chunk)
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        self.chunks.keys().copied()
    }

    /// Clears every dirty flag and returns the chunks that had one set, in no
    /// particular order. Stands in for a renderer finishing a remesh cycle.
    pub fn take_dirty(&mut self) -> Vec<ChunkPos> {
        self.chunks
            .values_mut()
            .filter_map(|c| c.set_dirty(false).then(|| c.pos()))
            .collect()
    }
}

impl ChunkProvider for ChunkStore {
    #[inline]
    fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    #[inline]
    fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    fn all_chunks(&self) -> Box<dyn Iterator<Item = &Chunk> + '_> {
        Box::new(self.chunks.values())
    }
}
