//! Batch light propagation over chunked voxel worlds.
#![forbid(unsafe_code)]

use lantern_blocks::BlockRegistry;
use lantern_chunk::{ChunkProvider, DirtyTracker};
use lantern_geom::ChunkPos;

mod change;
mod propagator;
mod regen;
mod rules;
mod view;

pub use change::BlockChange;
pub use propagator::StandardBatchPropagator;
pub use regen::SunlightRegenBatchPropagator;
pub use rules::{
    LightPropagationRules, PropagationComparison, PropagationRules, SunlightPropagationRules,
    SunlightRegenPropagationRules,
};
pub use view::{ChunkWorldView, PropagatorWorldView};

/// Everything a propagator needs for one pass over live chunks.
pub struct PropagationContext<'a, P: ChunkProvider + ?Sized> {
    pub chunks: &'a mut P,
    pub registry: &'a BlockRegistry,
    pub dirty: &'a DirtyTracker,
}

impl<'a, P: ChunkProvider + ?Sized> PropagationContext<'a, P> {
    pub fn new(chunks: &'a mut P, registry: &'a BlockRegistry, dirty: &'a DirtyTracker) -> Self {
        Self {
            chunks,
            registry,
            dirty,
        }
    }
}

/// A propagator the world provider can drive without knowing its field.
pub trait BatchPropagator<P: ChunkProvider + ?Sized> {
    /// Brings the field back to a consistent state after `changes`.
    fn process(&mut self, ctx: &mut PropagationContext<'_, P>, changes: &[BlockChange]);

    /// Lights a chunk that was just inserted into `ctx.chunks`.
    fn chunk_loaded(&mut self, ctx: &mut PropagationContext<'_, P>, pos: ChunkPos);
}

/// The two propagators every world runs, in order.
pub fn default_propagators<P: ChunkProvider + ?Sized>() -> Vec<Box<dyn BatchPropagator<P> + Send>> {
    vec![
        Box::new(StandardBatchPropagator::new(LightPropagationRules)),
        Box::new(SunlightRegenBatchPropagator::new()),
    ]
}
