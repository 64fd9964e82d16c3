use lantern_blocks::{BlockId, UNLOADED_ID};
use lantern_chunk::{ChunkProvider, DirtyTracker, LightField};
use lantern_geom::BlockPos;

/// Read/write access to one light field across chunk boundaries.
///
/// `None` means the position is unavailable (its chunk is not loaded or was
/// disposed); propagation treats that as an absorbing boundary.
pub trait PropagatorWorldView {
    fn value_at(&self, pos: BlockPos) -> Option<u8>;

    /// Stores `value` and returns the previous one; a no-op returning `None`
    /// when unavailable.
    fn set_value_at(&mut self, pos: BlockPos, value: u8) -> Option<u8>;

    /// Block id at `pos`, or [`UNLOADED_ID`] when unavailable.
    fn block_at(&self, pos: BlockPos) -> BlockId;

    /// Reads a sibling field at the same position.
    fn field_at(&self, field: LightField, pos: BlockPos) -> Option<u8>;
}

impl<W: PropagatorWorldView + ?Sized> PropagatorWorldView for &mut W {
    #[inline]
    fn value_at(&self, pos: BlockPos) -> Option<u8> {
        (**self).value_at(pos)
    }

    #[inline]
    fn set_value_at(&mut self, pos: BlockPos, value: u8) -> Option<u8> {
        (**self).set_value_at(pos, value)
    }

    #[inline]
    fn block_at(&self, pos: BlockPos) -> BlockId {
        (**self).block_at(pos)
    }

    #[inline]
    fn field_at(&self, field: LightField, pos: BlockPos) -> Option<u8> {
        (**self).field_at(field, pos)
    }
}

/// A light field view over loaded chunks. Writes to visible fields mark the
/// owning chunk dirty through `dirty`.
pub struct ChunkWorldView<'a, P: ChunkProvider + ?Sized> {
    chunks: &'a mut P,
    dirty: &'a DirtyTracker,
    field: LightField,
}

impl<'a, P: ChunkProvider + ?Sized> ChunkWorldView<'a, P> {
    pub fn new(chunks: &'a mut P, dirty: &'a DirtyTracker, field: LightField) -> Self {
        Self {
            chunks,
            dirty,
            field,
        }
    }

    pub fn light(chunks: &'a mut P, dirty: &'a DirtyTracker) -> Self {
        Self::new(chunks, dirty, LightField::Light)
    }

    pub fn sunlight(chunks: &'a mut P, dirty: &'a DirtyTracker) -> Self {
        Self::new(chunks, dirty, LightField::Sunlight)
    }

    pub fn sunlight_regen(chunks: &'a mut P, dirty: &'a DirtyTracker) -> Self {
        Self::new(chunks, dirty, LightField::SunlightRegen)
    }

    #[inline]
    pub fn field(&self) -> LightField {
        self.field
    }
}

impl<P: ChunkProvider + ?Sized> PropagatorWorldView for ChunkWorldView<'_, P> {
    #[inline]
    fn value_at(&self, pos: BlockPos) -> Option<u8> {
        self.field_at(self.field, pos)
    }

    fn set_value_at(&mut self, pos: BlockPos, value: u8) -> Option<u8> {
        let chunk = self
            .chunks
            .chunk_mut(pos.chunk_pos())
            .filter(|c| !c.is_disposed())?;
        let (x, y, z) = pos.relative();
        let old = chunk.set_field(self.field, x, y, z, value);
        if old != value && self.field.is_visible() {
            self.dirty.mark(chunk);
        }
        Some(old)
    }

    #[inline]
    fn block_at(&self, pos: BlockPos) -> BlockId {
        match self.chunks.chunk(pos.chunk_pos()) {
            Some(c) if !c.is_disposed() => {
                let (x, y, z) = pos.relative();
                c.block(x, y, z)
            }
            _ => UNLOADED_ID,
        }
    }

    #[inline]
    fn field_at(&self, field: LightField, pos: BlockPos) -> Option<u8> {
        let chunk = self
            .chunks
            .chunk(pos.chunk_pos())
            .filter(|c| !c.is_disposed())?;
        let (x, y, z) = pos.relative();
        Some(chunk.field(field, x, y, z))
    }
}
