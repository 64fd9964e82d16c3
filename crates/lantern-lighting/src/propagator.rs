use std::collections::VecDeque;

use hashbrown::HashSet;
use lantern_blocks::BlockRegistry;
use lantern_chunk::ChunkProvider;
use lantern_geom::{BlockPos, ChunkPos, Side};

use crate::change::BlockChange;
use crate::rules::PropagationRules;
use crate::view::{ChunkWorldView, PropagatorWorldView};
use crate::{BatchPropagator, PropagationContext};

// Insertion-ordered, de-duplicated positions waiting at one light level.
// Removal is lazy: the membership set is authoritative and stale queue
// entries are skipped when popped.
#[derive(Default)]
struct Frontier {
    order: VecDeque<BlockPos>,
    members: HashSet<BlockPos>,
}

impl Frontier {
    #[inline]
    fn push(&mut self, pos: BlockPos) {
        if self.members.insert(pos) {
            self.order.push_back(pos);
        }
    }

    #[inline]
    fn remove(&mut self, pos: BlockPos) {
        self.members.remove(&pos);
    }

    fn pop(&mut self) -> Option<BlockPos> {
        while let Some(pos) = self.order.pop_front() {
            if self.members.remove(&pos) {
                return Some(pos);
            }
        }
        None
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

/// Incremental wavefront propagator for one light field.
///
/// Frontiers are kept per level, strongest first (index 0 holds
/// `max_value`). A pass first reduces every position that may have lost its
/// supply, then spreads from every position that may now light its
/// neighbours. Unavailable positions are never entered.
pub struct StandardBatchPropagator<R: PropagationRules> {
    rules: R,
    reduce_queues: Vec<Frontier>,
    increase_queues: Vec<Frontier>,
    reduced: usize,
    increased: usize,
}

impl<R: PropagationRules> StandardBatchPropagator<R> {
    pub fn new(rules: R) -> Self {
        let levels = rules.max_value() as usize;
        Self {
            rules,
            reduce_queues: (0..levels).map(|_| Frontier::default()).collect(),
            increase_queues: (0..levels).map(|_| Frontier::default()).collect(),
            reduced: 0,
            increased: 0,
        }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// True when no work is queued.
    pub fn is_idle(&self) -> bool {
        self.reduce_queues.iter().all(Frontier::is_empty)
            && self.increase_queues.iter().all(Frontier::is_empty)
    }

    /// Reviews `changes` and runs the pass to completion.
    pub fn process_view<W: PropagatorWorldView + ?Sized>(
        &mut self,
        blocks: &BlockRegistry,
        world: &mut W,
        changes: &[BlockChange],
    ) {
        for change in changes {
            self.review_change(blocks, world, change);
        }
        self.flush(blocks, world);
    }

    /// Resolves everything queued so far: reductions, then increases.
    pub fn flush<W: PropagatorWorldView + ?Sized>(&mut self, blocks: &BlockRegistry, world: &mut W) {
        self.reduced = 0;
        self.increased = 0;
        self.process_reduction(blocks, world);
        self.process_increase(blocks, world);
        self.clean_up();
        if self.reduced + self.increased > 0 {
            log::trace!(
                target: "lighting",
                "{:?} pass: {} purged, {} pushed",
                self.rules.field(),
                self.reduced,
                self.increased
            );
        }
    }

    /// Queues `value` at `pos` to spread on the next flush.
    pub fn propagate_from(&mut self, pos: BlockPos, value: u8) {
        self.queue_spread_value(pos, value);
    }

    /// Sets `pos` to `value` if that brightens it and queues the spread.
    pub fn raise<W: PropagatorWorldView + ?Sized>(&mut self, world: &mut W, pos: BlockPos, value: u8) {
        if world.value_at(pos).is_some_and(|current| current < value) {
            self.increase(world, pos, value);
        }
    }

    /// Queues `pos`, currently holding `value`, to be reset to its fixed
    /// value and to withdraw whatever it supplied.
    pub fn regenerate(&mut self, pos: BlockPos, value: u8) {
        self.reduce(pos, value);
    }

    /// Queues initial lighting for a freshly loaded chunk: every fixed value
    /// inside it, plus the facing layer of each loaded neighbour so light
    /// flows across the new seams.
    pub fn seed_chunk<W: PropagatorWorldView + ?Sized>(
        &mut self,
        blocks: &BlockRegistry,
        world: &mut W,
        chunk: ChunkPos,
    ) {
        let region = chunk.block_region();
        for pos in region.iter() {
            let block = blocks.block(world.block_at(pos));
            let fixed = self.rules.fixed_value(&*world, block, pos);
            if fixed > 0 {
                self.raise(world, pos, fixed);
            }
        }
        for side in Side::ALL {
            let (dx, dy, dz) = side.direction();
            for pos in region.face(side).translate(dx, dy, dz).iter() {
                if let Some(value) = world.value_at(pos) {
                    self.queue_spread_value(pos, value);
                }
            }
        }
    }

    fn review_change<W: PropagatorWorldView + ?Sized>(
        &mut self,
        blocks: &BlockRegistry,
        world: &mut W,
        change: &BlockChange,
    ) {
        let from = blocks.block(change.from);
        let to = blocks.block(change.to);
        if !self.rules.is_relevant(from, to) {
            return;
        }
        let pos = change.pos;
        let Some(existing) = world.value_at(pos) else {
            return;
        };

        let new_value = self.rules.fixed_value(&*world, to, pos);
        if new_value > existing {
            self.increase(world, pos, new_value);
        }
        let old_value = self.rules.fixed_value(&*world, from, pos);
        if new_value < old_value {
            self.reduce(pos, old_value);
        }

        for side in Side::ALL {
            let comparison = self.rules.compare_propagation(to, from, side);
            let adj = pos.adjacent(side);
            if comparison.is_restricting() && existing > 0 {
                self.reduce(pos, existing);
                let supplied = self.rules.propagate_value(existing, side, from);
                if world.value_at(adj) == Some(supplied) {
                    self.reduce(adj, supplied);
                }
            } else if comparison.is_permitting() {
                if existing > 0 {
                    self.queue_spread_value(pos, existing);
                }
                if let Some(adj_value) = world.value_at(adj) {
                    self.queue_spread_value(adj, adj_value);
                }
            }
        }
    }

    // Resets `pos` to its fixed value and follows the light it supplied.
    fn purge<W: PropagatorWorldView + ?Sized>(
        &mut self,
        blocks: &BlockRegistry,
        world: &mut W,
        pos: BlockPos,
        old_value: u8,
    ) {
        self.reduced += 1;
        let level = self.level(old_value);
        self.increase_queues[level].remove(pos);

        let block = blocks.block(world.block_at(pos));
        let fixed = self.rules.fixed_value(&*world, block, pos);
        if fixed > 0 {
            self.increase(world, pos, fixed);
        } else {
            world.set_value_at(pos, 0);
        }

        for side in Side::ALL {
            if !self.rules.can_spread_out_of(block, side) {
                continue;
            }
            let expected = self.rules.propagate_value(old_value, side, block);
            let adj = pos.adjacent(side);
            match world.value_at(adj) {
                Some(adj_value) if adj_value == expected => {
                    let adj_block = blocks.block(world.block_at(adj));
                    if self.rules.can_spread_into(adj_block, side.reverse()) {
                        self.reduce(adj, expected);
                    }
                }
                // Lit from elsewhere; let it refill what was just cleared.
                Some(adj_value) if adj_value > 0 => self.queue_spread_value(adj, adj_value),
                _ => {}
            }
        }
    }

    fn push<W: PropagatorWorldView + ?Sized>(
        &mut self,
        blocks: &BlockRegistry,
        world: &mut W,
        pos: BlockPos,
        value: u8,
    ) {
        self.increased += 1;
        let block = blocks.block(world.block_at(pos));
        for side in Side::ALL {
            if !self.rules.can_spread_out_of(block, side) {
                continue;
            }
            let propagated = self.rules.propagate_value(value, side, block);
            let adj = pos.adjacent(side);
            let Some(adj_value) = world.value_at(adj) else {
                continue;
            };
            if adj_value < propagated {
                let adj_block = blocks.block(world.block_at(adj));
                if self.rules.can_spread_into(adj_block, side.reverse()) {
                    self.increase(world, adj, propagated);
                }
            }
        }
    }

    fn process_reduction<W: PropagatorWorldView + ?Sized>(&mut self, blocks: &BlockRegistry, world: &mut W) {
        let max = self.rules.max_value();
        for depth in 0..self.reduce_queues.len() {
            let old_value = max - depth as u8;
            while let Some(pos) = self.reduce_queues[depth].pop() {
                self.purge(blocks, world, pos, old_value);
            }
        }
    }

    fn process_increase<W: PropagatorWorldView + ?Sized>(&mut self, blocks: &BlockRegistry, world: &mut W) {
        let max = self.rules.max_value();
        // Level 1 never spreads.
        for depth in 0..self.increase_queues.len().saturating_sub(1) {
            let value = max - depth as u8;
            while let Some(pos) = self.increase_queues[depth].pop() {
                self.push(blocks, world, pos, value);
            }
        }
    }

    fn increase<W: PropagatorWorldView + ?Sized>(&mut self, world: &mut W, pos: BlockPos, value: u8) {
        world.set_value_at(pos, value);
        self.queue_spread_value(pos, value);
    }

    fn reduce(&mut self, pos: BlockPos, old_value: u8) {
        if old_value > 0 {
            let level = self.level(old_value);
            self.reduce_queues[level].push(pos);
        }
    }

    fn queue_spread_value(&mut self, pos: BlockPos, value: u8) {
        if value > 1 {
            let level = self.level(value);
            self.increase_queues[level].push(pos);
        }
    }

    fn clean_up(&mut self) {
        for queue in &mut self.increase_queues {
            queue.clear();
        }
    }

    #[inline]
    fn level(&self, value: u8) -> usize {
        let max = self.rules.max_value();
        assert!(
            value > 0 && value <= max,
            "light value {value} outside 1..={max}"
        );
        (max - value) as usize
    }
}

impl<P, R> BatchPropagator<P> for StandardBatchPropagator<R>
where
    P: ChunkProvider + ?Sized,
    R: PropagationRules,
{
    fn process(&mut self, ctx: &mut PropagationContext<'_, P>, changes: &[BlockChange]) {
        let field = self.rules.field();
        let mut view = ChunkWorldView::new(&mut *ctx.chunks, ctx.dirty, field);
        self.process_view(ctx.registry, &mut view, changes);
    }

    fn chunk_loaded(&mut self, ctx: &mut PropagationContext<'_, P>, pos: ChunkPos) {
        let field = self.rules.field();
        let mut view = ChunkWorldView::new(&mut *ctx.chunks, ctx.dirty, field);
        self.seed_chunk(ctx.registry, &mut view, pos);
        self.flush(ctx.registry, &mut view);
    }
}
