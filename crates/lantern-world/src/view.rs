use lantern_blocks::{AIR_ID, BlockId, BlockRegistry, BlockType, MAX_LIGHT};
use lantern_chunk::{Chunk, ChunkProvider, DirtyTracker};
use lantern_geom::{BlockPos, BlockRegion, ChunkRegion};
use log::warn;

/// Bounded access to a box of chunks, addressed relative to `origin`.
///
/// Reads outside the covered chunks return air and zero light. Writes
/// outside them are dropped with a warning.
pub struct ChunkView<'a, P: ChunkProvider + ?Sized> {
    chunks: &'a mut P,
    registry: &'a BlockRegistry,
    dirty: &'a DirtyTracker,
    chunk_region: ChunkRegion,
    region: BlockRegion,
    origin: BlockPos,
}

impl<'a, P: ChunkProvider + ?Sized> ChunkView<'a, P> {
    pub fn new(
        chunks: &'a mut P,
        registry: &'a BlockRegistry,
        dirty: &'a DirtyTracker,
        chunk_region: ChunkRegion,
        origin: BlockPos,
    ) -> Self {
        Self {
            chunks,
            registry,
            dirty,
            chunk_region,
            region: chunk_region.block_region(),
            origin,
        }
    }

    /// World-space blocks covered by the view.
    pub fn region(&self) -> BlockRegion {
        self.region
    }

    pub fn chunk_region(&self) -> ChunkRegion {
        self.chunk_region
    }

    pub fn origin(&self) -> BlockPos {
        self.origin
    }

    #[inline]
    pub fn to_world(&self, x: i32, y: i32, z: i32) -> BlockPos {
        self.origin.offset(x, y, z)
    }

    /// False once any covered chunk is missing or disposed.
    pub fn is_valid_view(&self) -> bool {
        self.chunk_region
            .iter()
            .all(|c| self.chunks.chunk(c).is_some_and(|c| !c.is_disposed()))
    }

    fn read(&self, x: i32, y: i32, z: i32) -> Option<(&Chunk, (usize, usize, usize))> {
        let pos = self.to_world(x, y, z);
        if !self.region.contains(pos) {
            return None;
        }
        self.chunks
            .chunk(pos.chunk_pos())
            .filter(|c| !c.is_disposed())
            .map(|c| (c, pos.relative()))
    }

    fn write(&mut self, op: &str, x: i32, y: i32, z: i32) -> Option<(&mut Chunk, (usize, usize, usize))> {
        let pos = self.to_world(x, y, z);
        if !self.region.contains(pos) {
            warn!(
                target: "world",
                "{} at {:?} outside view {:?}..{:?}",
                op,
                pos,
                self.region.min,
                self.region.max
            );
            return None;
        }
        self.chunks
            .chunk_mut(pos.chunk_pos())
            .filter(|c| !c.is_disposed())
            .map(|c| (c, pos.relative()))
    }

    pub fn block(&self, x: i32, y: i32, z: i32) -> BlockId {
        self.read(x, y, z)
            .map_or(AIR_ID, |(c, (lx, ly, lz))| c.block(lx, ly, lz))
    }

    pub fn block_type(&self, x: i32, y: i32, z: i32) -> &BlockType {
        self.registry.block(self.block(x, y, z))
    }

    pub fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        self.read(x, y, z)
            .map_or(0, |(c, (lx, ly, lz))| c.light(lx, ly, lz))
    }

    pub fn sunlight(&self, x: i32, y: i32, z: i32) -> u8 {
        self.read(x, y, z)
            .map_or(0, |(c, (lx, ly, lz))| c.sunlight(lx, ly, lz))
    }

    pub fn extra_data(&self, index: usize, x: i32, y: i32, z: i32) -> u32 {
        self.read(x, y, z)
            .filter(|(c, _)| index < c.extra_data_slots())
            .map_or(0, |(c, (lx, ly, lz))| c.extra_data(index, lx, ly, lz))
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) {
        let dirty = self.dirty;
        if let Some((chunk, (lx, ly, lz))) = self.write("set_block", x, y, z) {
            if chunk.set_block(lx, ly, lz, id) != id {
                dirty.mark(chunk);
            }
        }
    }

    pub fn set_light(&mut self, x: i32, y: i32, z: i32, value: u8) {
        if value > MAX_LIGHT {
            warn!(target: "world", "set_light: {} exceeds {} at ({}, {}, {})", value, MAX_LIGHT, x, y, z);
            return;
        }
        let dirty = self.dirty;
        if let Some((chunk, (lx, ly, lz))) = self.write("set_light", x, y, z) {
            if chunk.set_light(lx, ly, lz, value) != value {
                dirty.mark(chunk);
            }
        }
    }

    pub fn set_sunlight(&mut self, x: i32, y: i32, z: i32, value: u8) {
        if value > MAX_LIGHT {
            warn!(target: "world", "set_sunlight: {} exceeds {} at ({}, {}, {})", value, MAX_LIGHT, x, y, z);
            return;
        }
        let dirty = self.dirty;
        if let Some((chunk, (lx, ly, lz))) = self.write("set_sunlight", x, y, z) {
            if chunk.set_sunlight(lx, ly, lz, value) != value {
                dirty.mark(chunk);
            }
        }
    }

    pub fn set_extra_data(&mut self, index: usize, x: i32, y: i32, z: i32, value: u32) {
        let dirty = self.dirty;
        if let Some((chunk, (lx, ly, lz))) = self.write("set_extra_data", x, y, z) {
            if index >= chunk.extra_data_slots() {
                warn!(target: "world", "extra data slot {} out of range", index);
                return;
            }
            if chunk.set_extra_data(index, lx, ly, lz, value) != value {
                dirty.mark(chunk);
            }
        }
    }

    /// Dirties every covered chunk within one block of `region` (world
    /// coordinates) so seams remesh against the new light.
    pub fn set_dirty_around(&mut self, region: BlockRegion) {
        for pos in region.expand(1, 1, 1).chunk_region().iter() {
            if self.chunk_region.contains(pos) {
                self.dirty.mark_at(&mut *self.chunks, pos);
            }
        }
    }
}
