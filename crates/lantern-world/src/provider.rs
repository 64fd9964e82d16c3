use std::sync::Arc;

use hashbrown::HashMap;
use lantern_blocks::{BlockId, BlockRegistry, UNLOADED_ID};
use lantern_chunk::{Chunk, ChunkProvider, ChunkStore, DirtyTracker};
use lantern_geom::{BlockPos, BlockRegion, ChunkPos, ChunkRegion};
use lantern_lighting::{BatchPropagator, BlockChange, PropagationContext, default_propagators};
use log::{debug, trace, warn};

use crate::listener::{ListenerRegistry, WorldChangeListener};
use crate::view::ChunkView;
use crate::{WorldInfo, WorldProviderCore};

type Propagators<P> = Vec<Box<dyn BatchPropagator<P> + Send>>;

/// Owns the loaded chunks and the changes recorded since the last
/// propagation pass.
pub struct WorldProviderCoreImpl<P: ChunkProvider> {
    info: WorldInfo,
    chunks: P,
    registry: Arc<BlockRegistry>,
    dirty: DirtyTracker,
    changes: HashMap<BlockPos, BlockChange>,
    propagators: Propagators<P>,
    listeners: ListenerRegistry,
}

impl<P: ChunkProvider> WorldProviderCoreImpl<P> {
    pub fn new(info: WorldInfo, chunks: P, registry: Arc<BlockRegistry>, dirty: DirtyTracker) -> Self {
        Self::with_propagators(info, chunks, registry, dirty, default_propagators())
    }

    /// Propagators run in order on every pass.
    pub fn with_propagators(
        info: WorldInfo,
        chunks: P,
        registry: Arc<BlockRegistry>,
        dirty: DirtyTracker,
        propagators: Propagators<P>,
    ) -> Self {
        Self {
            info,
            chunks,
            registry,
            dirty,
            changes: HashMap::new(),
            propagators,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn chunks(&self) -> &P {
        &self.chunks
    }

    /// Direct storage access for loading and eviction. Block writes made
    /// through this bypass change tracking.
    pub fn chunks_mut(&mut self) -> &mut P {
        &mut self.chunks
    }

    pub fn dirty_tracker(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn registry_handle(&self) -> Arc<BlockRegistry> {
        Arc::clone(&self.registry)
    }

    /// Seeds light for a chunk the caller just inserted and marks it ready.
    /// Returns false if no live chunk is stored at `pos`.
    pub fn chunk_ready(&mut self, pos: ChunkPos) -> bool {
        if !self.chunks.chunk(pos).is_some_and(|c| !c.is_disposed()) {
            warn!(target: "world", "chunk_ready for missing chunk {:?}", pos);
            return false;
        }
        let mut ctx = PropagationContext::new(&mut self.chunks, &self.registry, &self.dirty);
        for propagator in &mut self.propagators {
            propagator.chunk_loaded(&mut ctx, pos);
        }
        if let Some(chunk) = self.chunks.chunk_mut(pos) {
            chunk.mark_ready();
            self.dirty.mark(chunk);
        }
        debug!(target: "world", "chunk {:?} ready", pos);
        true
    }

    /// Forgets pending changes inside a chunk that is leaving storage.
    pub fn chunk_unloaded(&mut self, pos: ChunkPos) {
        let before = self.changes.len();
        self.changes.retain(|p, _| p.chunk_pos() != pos);
        debug!(
            target: "world",
            "chunk {:?} unloaded, dropped {} pending changes",
            pos,
            before - self.changes.len()
        );
    }

    /// View over `chunk` and its 26 neighbours, addressed from the chunk's
    /// first block. `None` unless every covered chunk is ready.
    pub fn local_view(&mut self, chunk: ChunkPos) -> Option<ChunkView<'_, P>> {
        self.view_over(ChunkRegion::around(chunk, 1), chunk.min_block())
    }

    /// View over the chunks touching `region`, addressed from `region.min`.
    /// `None` unless every covered chunk is ready.
    pub fn world_view_around(&mut self, region: BlockRegion) -> Option<ChunkView<'_, P>> {
        self.view_over(region.chunk_region(), region.min)
    }

    fn view_over(&mut self, chunks: ChunkRegion, origin: BlockPos) -> Option<ChunkView<'_, P>> {
        if !chunks.iter().all(|c| self.chunks.is_chunk_ready(c)) {
            return None;
        }
        Some(ChunkView::new(
            &mut self.chunks,
            &self.registry,
            &self.dirty,
            chunks,
            origin,
        ))
    }

    /// Removes every pending change without propagating it.
    pub fn clear(&mut self) {
        self.changes.clear();
    }

    fn live_chunk(&self, pos: BlockPos) -> Option<&Chunk> {
        self.chunks
            .chunk(pos.chunk_pos())
            .filter(|c| !c.is_disposed())
    }

    fn live_chunk_mut(&mut self, pos: BlockPos) -> Option<&mut Chunk> {
        self.chunks
            .chunk_mut(pos.chunk_pos())
            .filter(|c| !c.is_disposed())
    }

    // A block touches the faces of up to eight chunks, so dirty everything
    // within one block of it.
    fn set_dirty_chunks_near(&mut self, pos: BlockPos) {
        for chunk in BlockRegion::from_point(pos).expand(1, 1, 1).chunk_region().iter() {
            self.dirty.mark_at(&mut self.chunks, chunk);
        }
    }

    fn record_change(&mut self, pos: BlockPos, from: BlockId, to: BlockId) {
        self.changes
            .entry(pos)
            .and_modify(|c| c.retarget(to))
            .or_insert_with(|| BlockChange::new(pos, from, to));
    }

    /// Swaps the block and records the change. Returns the old id, or `None`
    /// when nothing was written.
    fn write_block(&mut self, pos: BlockPos, id: BlockId) -> Option<BlockId> {
        if self.registry.get(id).is_none() {
            warn!(target: "world", "refusing unknown block id {} at {:?}", id, pos);
            return None;
        }
        let (x, y, z) = pos.relative();
        let old = self.live_chunk_mut(pos)?.set_block(x, y, z, id);
        if old != id {
            self.record_change(pos, old, id);
            self.set_dirty_chunks_near(pos);
        }
        Some(old)
    }
}

impl WorldProviderCoreImpl<ChunkStore> {
    /// Stores a freshly generated chunk and lights it. A chunk already at
    /// that position is replaced and disposed.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> ChunkPos {
        let pos = chunk.pos();
        if self.chunks.insert(chunk).is_some() {
            self.chunk_unloaded(pos);
        }
        self.chunk_ready(pos);
        pos
    }

    pub fn remove_chunk(&mut self, pos: ChunkPos) -> Option<Chunk> {
        self.chunk_unloaded(pos);
        self.chunks.remove(pos)
    }

    /// Clears dirty flags, returning the chunks that need a remesh.
    pub fn take_dirty(&mut self) -> Vec<ChunkPos> {
        self.chunks.take_dirty()
    }
}

impl<P: ChunkProvider> WorldProviderCore for WorldProviderCoreImpl<P> {
    fn world_info(&self) -> &WorldInfo {
        &self.info
    }

    fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    fn register_listener(&self, listener: Arc<dyn WorldChangeListener>) {
        self.listeners.register(listener);
    }

    fn unregister_listener(&self, listener: &Arc<dyn WorldChangeListener>) -> bool {
        self.listeners.unregister(listener)
    }

    fn set_block(&mut self, pos: BlockPos, id: BlockId) -> Option<BlockId> {
        let old = self.write_block(pos, id)?;
        if old != id {
            self.listeners.notify_block_changed(pos, id, old);
        }
        Some(old)
    }

    fn set_blocks(&mut self, blocks: &[(BlockPos, BlockId)]) -> HashMap<BlockPos, Option<BlockId>> {
        let mut result = HashMap::with_capacity(blocks.len());
        let mut changed = Vec::new();
        for &(pos, id) in blocks {
            let old = self.write_block(pos, id);
            if let Some(old) = old.filter(|old| *old != id) {
                changed.push((pos, id, old));
            }
            result.insert(pos, old);
        }
        for (pos, id, old) in changed {
            self.listeners.notify_block_changed(pos, id, old);
        }
        result
    }

    fn set_extra_data(&mut self, index: usize, pos: BlockPos, value: u32) -> Option<u32> {
        let (x, y, z) = pos.relative();
        let chunk = self.live_chunk_mut(pos)?;
        if index >= chunk.extra_data_slots() {
            warn!(
                target: "world",
                "extra data slot {} out of range ({} slots)",
                index,
                chunk.extra_data_slots()
            );
            return None;
        }
        let old = chunk.set_extra_data(index, x, y, z, value);
        if old != value {
            self.set_dirty_chunks_near(pos);
            self.listeners.notify_extra_data_changed(index, pos, value, old);
        }
        Some(old)
    }

    fn process_propagation(&mut self) {
        if self.changes.is_empty() {
            return;
        }
        let mut changes: Vec<BlockChange> = self.changes.drain().map(|(_, c)| c).collect();
        changes.sort_unstable_by_key(|c| c.pos);
        trace!(target: "world", "propagating {} changes", changes.len());
        let mut ctx = PropagationContext::new(&mut self.chunks, &self.registry, &self.dirty);
        for propagator in &mut self.propagators {
            propagator.process(&mut ctx, &changes);
        }
    }

    fn block(&self, pos: BlockPos) -> BlockId {
        let (x, y, z) = pos.relative();
        self.live_chunk(pos)
            .map_or(UNLOADED_ID, |c| c.block(x, y, z))
    }

    fn light(&self, pos: BlockPos) -> u8 {
        let (x, y, z) = pos.relative();
        self.live_chunk(pos).map_or(0, |c| c.light(x, y, z))
    }

    fn sunlight(&self, pos: BlockPos) -> u8 {
        let (x, y, z) = pos.relative();
        self.live_chunk(pos).map_or(0, |c| c.sunlight(x, y, z))
    }

    fn extra_data(&self, index: usize, pos: BlockPos) -> u32 {
        let (x, y, z) = pos.relative();
        self.live_chunk(pos)
            .filter(|c| index < c.extra_data_slots())
            .map_or(0, |c| c.extra_data(index, x, y, z))
    }

    fn is_block_relevant(&self, pos: BlockPos) -> bool {
        self.chunks.is_chunk_ready(pos.chunk_pos())
    }

    fn is_region_relevant(&self, region: BlockRegion) -> bool {
        region
            .chunk_region()
            .iter()
            .all(|c| self.chunks.is_chunk_ready(c))
    }

    fn relevant_regions(&self) -> Vec<BlockRegion> {
        self.chunks
            .all_chunks()
            .filter(|c| c.is_ready() && !c.is_disposed())
            .map(|c| c.pos().block_region())
            .collect()
    }

    fn pending_changes(&self) -> usize {
        self.changes.len()
    }
}
