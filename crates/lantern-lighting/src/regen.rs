use hashbrown::HashMap;
use lantern_blocks::BlockId;
use lantern_chunk::{ChunkProvider, LightField};
use lantern_geom::{BlockPos, ChunkPos, Side};

use crate::change::BlockChange;
use crate::propagator::StandardBatchPropagator;
use crate::rules::{SunlightPropagationRules, SunlightRegenPropagationRules};
use crate::view::{ChunkWorldView, PropagatorWorldView};
use crate::{BatchPropagator, PropagationContext};

// Wraps a regen view and remembers, per position, the marker before the
// first write and after the last one.
struct RecordingView<'w, W: ?Sized> {
    inner: &'w mut W,
    index: HashMap<BlockPos, usize>,
    changes: Vec<(BlockPos, u8, u8)>,
}

impl<'w, W: PropagatorWorldView + ?Sized> RecordingView<'w, W> {
    fn new(inner: &'w mut W) -> Self {
        Self {
            inner,
            index: HashMap::new(),
            changes: Vec::new(),
        }
    }

    // Net changes only, in first-touch order.
    fn into_changes(self) -> Vec<(BlockPos, u8, u8)> {
        self.changes
            .into_iter()
            .filter(|(_, old, new)| old != new)
            .collect()
    }
}

impl<W: PropagatorWorldView + ?Sized> PropagatorWorldView for RecordingView<'_, W> {
    #[inline]
    fn value_at(&self, pos: BlockPos) -> Option<u8> {
        self.inner.value_at(pos)
    }

    fn set_value_at(&mut self, pos: BlockPos, value: u8) -> Option<u8> {
        let old = self.inner.set_value_at(pos, value)?;
        match self.index.get(&pos) {
            Some(&i) => self.changes[i].2 = value,
            None => {
                self.index.insert(pos, self.changes.len());
                self.changes.push((pos, old, value));
            }
        }
        Some(old)
    }

    #[inline]
    fn block_at(&self, pos: BlockPos) -> BlockId {
        self.inner.block_at(pos)
    }

    #[inline]
    fn field_at(&self, field: LightField, pos: BlockPos) -> Option<u8> {
        self.inner.field_at(field, pos)
    }
}

/// Sunlight as two chained passes.
///
/// The regen pass maintains the column sky-access marker. Every marker that
/// rises is pushed into the sunlight field, every marker that falls has its
/// sunlight withdrawn, and then the sunlight pass reviews the same block
/// changes for lateral spread.
pub struct SunlightRegenBatchPropagator {
    regen: StandardBatchPropagator<SunlightRegenPropagationRules>,
    sunlight: StandardBatchPropagator<SunlightPropagationRules>,
}

impl Default for SunlightRegenBatchPropagator {
    fn default() -> Self {
        Self::new()
    }
}

impl SunlightRegenBatchPropagator {
    pub fn new() -> Self {
        Self {
            regen: StandardBatchPropagator::new(SunlightRegenPropagationRules),
            sunlight: StandardBatchPropagator::new(SunlightPropagationRules),
        }
    }

    fn forward<S: PropagatorWorldView + ?Sized>(&mut self, sun_world: &mut S, markers: &[(BlockPos, u8, u8)]) {
        if !markers.is_empty() {
            log::trace!(target: "lighting", "forwarding {} regen changes", markers.len());
        }
        for &(pos, old, new) in markers {
            if new > old {
                self.sunlight.raise(sun_world, pos, new);
            } else if let Some(current) = sun_world.value_at(pos) {
                self.sunlight.regenerate(pos, current);
            }
        }
    }
}

impl<P: ChunkProvider + ?Sized> BatchPropagator<P> for SunlightRegenBatchPropagator {
    fn process(&mut self, ctx: &mut PropagationContext<'_, P>, changes: &[BlockChange]) {
        let markers = {
            let mut regen_view = ChunkWorldView::sunlight_regen(&mut *ctx.chunks, ctx.dirty);
            let mut recording = RecordingView::new(&mut regen_view);
            self.regen.process_view(ctx.registry, &mut recording, changes);
            recording.into_changes()
        };
        let mut sun_view = ChunkWorldView::sunlight(&mut *ctx.chunks, ctx.dirty);
        self.forward(&mut sun_view, &markers);
        self.sunlight.process_view(ctx.registry, &mut sun_view, changes);
    }

    fn chunk_loaded(&mut self, ctx: &mut PropagationContext<'_, P>, pos: ChunkPos) {
        let markers = {
            let mut regen_view = ChunkWorldView::sunlight_regen(&mut *ctx.chunks, ctx.dirty);
            let mut recording = RecordingView::new(&mut regen_view);
            self.regen.seed_chunk(ctx.registry, &mut recording, pos);
            // The chunk below assumed open sky while this one was missing.
            let below_top = pos.adjacent(Side::Bottom).block_region().face(Side::Top);
            for p in below_top.iter() {
                if let Some(value) = recording.value_at(p) {
                    self.regen.regenerate(p, value);
                }
            }
            self.regen.flush(ctx.registry, &mut recording);
            recording.into_changes()
        };
        let mut sun_view = ChunkWorldView::sunlight(&mut *ctx.chunks, ctx.dirty);
        self.forward(&mut sun_view, &markers);
        self.sunlight.seed_chunk(ctx.registry, &mut sun_view, pos);
        self.sunlight.flush(ctx.registry, &mut sun_view);
    }
}
