//! Block and chunk coordinates, faces and regions.
#![forbid(unsafe_code)]

mod chunk_math;
mod region;
mod side;

pub use chunk_math::*;
pub use region::{BlockRegion, ChunkRegion};
pub use side::Side;

/// A block position in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ZERO: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Saturates at the `i32` bounds.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    #[inline]
    pub const fn adjacent(self, side: Side) -> Self {
        let (dx, dy, dz) = side.direction();
        self.offset(dx, dy, dz)
    }

    #[inline]
    pub const fn chunk_pos(self) -> ChunkPos {
        ChunkPos {
            cx: chunk_pos_x(self.x),
            cy: chunk_pos_y(self.y),
            cz: chunk_pos_z(self.z),
        }
    }

    /// Position inside the owning chunk.
    #[inline]
    pub const fn relative(self) -> (usize, usize, usize) {
        (relative_x(self.x), relative_y(self.y), relative_z(self.z))
    }

    /// Manhattan distance.
    #[inline]
    pub fn grid_distance(self, other: BlockPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<BlockPos> for (i32, i32, i32) {
    fn from(value: BlockPos) -> Self {
        (value.x, value.y, value.z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn adjacent(self, side: Side) -> Self {
        let (dx, dy, dz) = side.direction();
        self.offset(dx, dy, dz)
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkPos) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }

    /// World position of local block (0, 0, 0).
    #[inline]
    pub const fn min_block(self) -> BlockPos {
        BlockPos {
            x: world_pos(self.cx, 0, CHUNK_POWER_X),
            y: world_pos(self.cy, 0, CHUNK_POWER_Y),
            z: world_pos(self.cz, 0, CHUNK_POWER_Z),
        }
    }

    #[inline]
    pub const fn world_pos(self, x: usize, y: usize, z: usize) -> BlockPos {
        BlockPos {
            x: world_pos(self.cx, x as i32, CHUNK_POWER_X),
            y: world_pos(self.cy, y as i32, CHUNK_POWER_Y),
            z: world_pos(self.cz, z as i32, CHUNK_POWER_Z),
        }
    }

    pub fn block_region(self) -> BlockRegion {
        let min = self.min_block();
        let max = min.offset(
            CHUNK_SIZE_X as i32 - 1,
            CHUNK_SIZE_Y as i32 - 1,
            CHUNK_SIZE_Z as i32 - 1,
        );
        BlockRegion::new(min, max)
    }
}

impl From<(i32, i32, i32)> for ChunkPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkPos> for (i32, i32, i32) {
    fn from(value: ChunkPos) -> Self {
        (value.cx, value.cy, value.cz)
    }
}
