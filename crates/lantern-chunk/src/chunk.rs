use lantern_blocks::{AIR_ID, BlockId};
use lantern_geom::{BlockPos, CHUNK_SIZE_X, CHUNK_SIZE_Z, CHUNK_VOLUME, ChunkPos};

use crate::nibble::NibbleArray;

/// Which per-block light field to read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightField {
    Light,
    Sunlight,
    /// Column sky-access marker feeding sunlight. Never rendered.
    SunlightRegen,
}

impl LightField {
    /// Whether changes to this field are visible and need a remesh.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, LightField::SunlightRegen)
    }
}

#[inline]
fn idx(x: usize, y: usize, z: usize) -> usize {
    (y * CHUNK_SIZE_Z + z) * CHUNK_SIZE_X + x
}

#[derive(Clone, Debug)]
pub struct Chunk {
    pos: ChunkPos,
    blocks: Vec<BlockId>,
    light: NibbleArray,
    sunlight: NibbleArray,
    regen: NibbleArray,
    extra: Vec<Vec<u32>>,
    dirty: bool,
    ready: bool,
    disposed: bool,
}

impl Chunk {
    /// An all-air chunk with `extra_slots` extra-data layers.
    pub fn new(pos: ChunkPos, extra_slots: usize) -> Self {
        Self::filled(pos, AIR_ID, extra_slots)
    }

    pub fn filled(pos: ChunkPos, block: BlockId, extra_slots: usize) -> Self {
        Self {
            pos,
            blocks: vec![block; CHUNK_VOLUME],
            light: NibbleArray::new(CHUNK_VOLUME),
            sunlight: NibbleArray::new(CHUNK_VOLUME),
            regen: NibbleArray::new(CHUNK_VOLUME),
            extra: vec![vec![0; CHUNK_VOLUME]; extra_slots],
            dirty: false,
            ready: false,
            disposed: false,
        }
    }

    #[inline]
    pub fn pos(&self) -> ChunkPos {
        self.pos
    }

    /// Whether `pos` lies inside this chunk.
    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.chunk_pos() == self.pos
    }

    #[inline]
    pub fn block(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[idx(x, y, z)]
    }

    #[inline]
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, id: BlockId) -> BlockId {
        std::mem::replace(&mut self.blocks[idx(x, y, z)], id)
    }

    #[inline]
    pub fn light(&self, x: usize, y: usize, z: usize) -> u8 {
        self.light.get(idx(x, y, z))
    }

    #[inline]
    pub fn set_light(&mut self, x: usize, y: usize, z: usize, v: u8) -> u8 {
        self.light.set(idx(x, y, z), v)
    }

    #[inline]
    pub fn sunlight(&self, x: usize, y: usize, z: usize) -> u8 {
        self.sunlight.get(idx(x, y, z))
    }

    #[inline]
    pub fn set_sunlight(&mut self, x: usize, y: usize, z: usize, v: u8) -> u8 {
        self.sunlight.set(idx(x, y, z), v)
    }

    #[inline]
    pub fn sunlight_regen(&self, x: usize, y: usize, z: usize) -> u8 {
        self.regen.get(idx(x, y, z))
    }

    #[inline]
    pub fn set_sunlight_regen(&mut self, x: usize, y: usize, z: usize, v: u8) -> u8 {
        self.regen.set(idx(x, y, z), v)
    }

    #[inline]
    pub fn field(&self, field: LightField, x: usize, y: usize, z: usize) -> u8 {
        match field {
            LightField::Light => self.light(x, y, z),
            LightField::Sunlight => self.sunlight(x, y, z),
            LightField::SunlightRegen => self.sunlight_regen(x, y, z),
        }
    }

    #[inline]
    pub fn set_field(&mut self, field: LightField, x: usize, y: usize, z: usize, v: u8) -> u8 {
        match field {
            LightField::Light => self.set_light(x, y, z, v),
            LightField::Sunlight => self.set_sunlight(x, y, z, v),
            LightField::SunlightRegen => self.set_sunlight_regen(x, y, z, v),
        }
    }

    #[inline]
    pub fn extra_data_slots(&self) -> usize {
        self.extra.len()
    }

    /// Panics if `index` is not below [`extra_data_slots`](Self::extra_data_slots).
    #[inline]
    pub fn extra_data(&self, index: usize, x: usize, y: usize, z: usize) -> u32 {
        self.extra[index][idx(x, y, z)]
    }

    #[inline]
    pub fn set_extra_data(&mut self, index: usize, x: usize, y: usize, z: usize, v: u32) -> u32 {
        std::mem::replace(&mut self.extra[index][idx(x, y, z)], v)
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true only when the flag actually changed.
    #[inline]
    pub fn set_dirty(&mut self, dirty: bool) -> bool {
        let changed = self.dirty != dirty;
        self.dirty = dirty;
        changed
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Drops the data arrays; the chunk must not be read afterwards.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.ready = false;
        self.blocks = Vec::new();
        self.extra = Vec::new();
        self.light = NibbleArray::new(0);
        self.sunlight = NibbleArray::new(0);
        self.regen = NibbleArray::new(0);
    }
}
