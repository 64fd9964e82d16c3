use std::sync::{Arc, Mutex, PoisonError};

use lantern_geom::ChunkPos;

use crate::chunk::Chunk;
use crate::provider::ChunkProvider;

/// Receives a chunk position each time that chunk's mesh goes stale.
pub trait DirtyListener: Send + Sync {
    fn chunk_dirtied(&self, pos: ChunkPos);
}

/// Flips chunk dirty flags and forwards the clean -> dirty transitions.
///
/// A chunk is reported once per remesh cycle no matter how many writes hit
/// it; the renderer re-arms it by clearing the flag.
#[derive(Clone, Default)]
pub struct DirtyTracker {
    listener: Option<Arc<dyn DirtyListener>>,
}

impl DirtyTracker {
    pub fn new(listener: Arc<dyn DirtyListener>) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    /// Tracker that only flips flags.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Returns true if this call dirtied the chunk.
    pub fn mark(&self, chunk: &mut Chunk) -> bool {
        if chunk.is_disposed() || !chunk.set_dirty(true) {
            return false;
        }
        if let Some(listener) = &self.listener {
            listener.chunk_dirtied(chunk.pos());
        }
        true
    }

    pub fn mark_at<P: ChunkProvider + ?Sized>(&self, chunks: &mut P, pos: ChunkPos) -> bool {
        chunks.chunk_mut(pos).is_some_and(|c| self.mark(c))
    }
}

/// Listener that records every notification, in order.
#[derive(Default)]
pub struct DirtyLog {
    entries: Mutex<Vec<ChunkPos>>,
}

impl DirtyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<ChunkPos> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn snapshot(&self) -> Vec<ChunkPos> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, pos: ChunkPos) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|p| **p == pos)
            .count()
    }
}

impl DirtyListener for DirtyLog {
    fn chunk_dirtied(&self, pos: ChunkPos) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(pos);
    }
}
