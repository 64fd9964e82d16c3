use std::sync::Arc;
use std::thread::{self, ThreadId};

use hashbrown::HashMap;
use lantern_blocks::{BlockId, BlockRegistry};
use lantern_geom::{BlockPos, BlockRegion};
use log::error;

use crate::listener::WorldChangeListener;
use crate::{WorldInfo, WorldProviderCore};

/// Refuses mutations from any thread other than the one that built it.
pub struct MainThreadWorldProvider<W> {
    inner: W,
    owner: ThreadId,
}

impl<W: WorldProviderCore> MainThreadWorldProvider<W> {
    /// Binds `inner` to the calling thread.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            owner: thread::current().id(),
        }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// Unchecked access for lifecycle work such as chunk loading.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn on_owner_thread(&self, op: &str) -> bool {
        let current = thread::current();
        if current.id() == self.owner {
            return true;
        }
        error!(
            target: "world",
            "{} called from thread {:?} ({:?}); world belongs to {:?}",
            op,
            current.name().unwrap_or("unnamed"),
            current.id(),
            self.owner
        );
        false
    }
}

impl<W: WorldProviderCore> WorldProviderCore for MainThreadWorldProvider<W> {
    fn world_info(&self) -> &WorldInfo {
        self.inner.world_info()
    }

    fn registry(&self) -> &BlockRegistry {
        self.inner.registry()
    }

    fn register_listener(&self, listener: Arc<dyn WorldChangeListener>) {
        self.inner.register_listener(listener);
    }

    fn unregister_listener(&self, listener: &Arc<dyn WorldChangeListener>) -> bool {
        self.inner.unregister_listener(listener)
    }

    fn set_block(&mut self, pos: BlockPos, id: BlockId) -> Option<BlockId> {
        if !self.on_owner_thread("set_block") {
            return None;
        }
        self.inner.set_block(pos, id)
    }

    fn set_blocks(&mut self, blocks: &[(BlockPos, BlockId)]) -> HashMap<BlockPos, Option<BlockId>> {
        if !self.on_owner_thread("set_blocks") {
            return blocks.iter().map(|&(pos, _)| (pos, None)).collect();
        }
        self.inner.set_blocks(blocks)
    }

    fn set_extra_data(&mut self, index: usize, pos: BlockPos, value: u32) -> Option<u32> {
        if !self.on_owner_thread("set_extra_data") {
            return None;
        }
        self.inner.set_extra_data(index, pos, value)
    }

    fn process_propagation(&mut self) {
        if self.on_owner_thread("process_propagation") {
            self.inner.process_propagation();
        }
    }

    fn block(&self, pos: BlockPos) -> BlockId {
        self.inner.block(pos)
    }

    fn light(&self, pos: BlockPos) -> u8 {
        self.inner.light(pos)
    }

    fn sunlight(&self, pos: BlockPos) -> u8 {
        self.inner.sunlight(pos)
    }

    fn total_light(&self, pos: BlockPos) -> u8 {
        self.inner.total_light(pos)
    }

    fn extra_data(&self, index: usize, pos: BlockPos) -> u32 {
        self.inner.extra_data(index, pos)
    }

    fn is_block_relevant(&self, pos: BlockPos) -> bool {
        self.inner.is_block_relevant(pos)
    }

    fn is_region_relevant(&self, region: BlockRegion) -> bool {
        self.inner.is_region_relevant(region)
    }

    fn relevant_regions(&self) -> Vec<BlockRegion> {
        self.inner.relevant_regions()
    }

    fn pending_changes(&self) -> usize {
        self.inner.pending_changes()
    }
}
