//! World provider: block mutation, change tracking, listeners and chunk views.
#![forbid(unsafe_code)]

use std::sync::Arc;

use hashbrown::HashMap;
use lantern_blocks::{BlockId, BlockRegistry};
use lantern_geom::{BlockPos, BlockRegion};

mod config;
mod listener;
mod loader;
mod main_thread;
mod provider;
mod view;

pub use config::{ConfigError, GeneratorConfig, WorldConfig};
pub use listener::{ListenerRegistry, WorldChangeListener};
pub use loader::{ChunkGenerator, ChunkLoader, FlatGenerator};
pub use main_thread::MainThreadWorldProvider;
pub use provider::WorldProviderCoreImpl;
pub use view::ChunkView;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldInfo {
    pub title: String,
    pub seed: String,
}

impl WorldInfo {
    pub fn new(title: impl Into<String>, seed: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            seed: seed.into(),
        }
    }
}

/// Block-level access to a live world.
///
/// Reads never fail: positions in unloaded chunks report the unloaded block
/// and zero light. Mutations report the previous value, or `None` when the
/// owning chunk is not loaded.
pub trait WorldProviderCore {
    fn world_info(&self) -> &WorldInfo;

    fn registry(&self) -> &BlockRegistry;

    fn register_listener(&self, listener: Arc<dyn WorldChangeListener>);

    /// Returns false if `listener` was not registered.
    fn unregister_listener(&self, listener: &Arc<dyn WorldChangeListener>) -> bool;

    fn set_block(&mut self, pos: BlockPos, id: BlockId) -> Option<BlockId>;

    /// Applies every write, then notifies listeners. Positions in unloaded
    /// chunks map to `None`.
    fn set_blocks(&mut self, blocks: &[(BlockPos, BlockId)]) -> HashMap<BlockPos, Option<BlockId>>;

    fn set_extra_data(&mut self, index: usize, pos: BlockPos, value: u32) -> Option<u32>;

    /// Runs every propagator over the changes recorded since the last call.
    fn process_propagation(&mut self);

    fn block(&self, pos: BlockPos) -> BlockId;

    fn light(&self, pos: BlockPos) -> u8;

    fn sunlight(&self, pos: BlockPos) -> u8;

    fn total_light(&self, pos: BlockPos) -> u8 {
        self.light(pos).max(self.sunlight(pos))
    }

    fn extra_data(&self, index: usize, pos: BlockPos) -> u32;

    fn is_block_relevant(&self, pos: BlockPos) -> bool;

    fn is_region_relevant(&self, region: BlockRegion) -> bool;

    /// Block regions of every ready chunk.
    fn relevant_regions(&self) -> Vec<BlockRegion>;

    /// Number of positions waiting for the next propagation pass.
    fn pending_changes(&self) -> usize;
}
