use lantern_blocks::BlockId;
use lantern_geom::BlockPos;

/// One pending block mutation since the last propagation pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub from: BlockId,
    pub to: BlockId,
}

impl BlockChange {
    #[inline]
    pub const fn new(pos: BlockPos, from: BlockId, to: BlockId) -> Self {
        Self { pos, from, to }
    }

    /// Replaces the target type, keeping the original `from`.
    #[inline]
    pub fn retarget(&mut self, to: BlockId) {
        self.to = to;
    }

    /// A change that was later reverted within the same batch.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}
