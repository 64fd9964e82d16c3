use crate::{BlockPos, ChunkPos, Side};

/// Inclusive axis-aligned box of block positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockRegion {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl BlockRegion {
    /// Builds a region from two corners in any order.
    pub fn new(a: BlockPos, b: BlockPos) -> Self {
        Self {
            min: BlockPos::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: BlockPos::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    #[inline]
    pub const fn from_point(pos: BlockPos) -> Self {
        Self { min: pos, max: pos }
    }

    #[inline]
    pub const fn expand(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            min: self.min.offset(-dx, -dy, -dz),
            max: self.max.offset(dx, dy, dz),
        }
    }

    #[inline]
    pub const fn translate(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            min: self.min.offset(dx, dy, dz),
            max: self.max.offset(dx, dy, dz),
        }
    }

    /// The one-block-thick layer of this region on `side`.
    pub fn face(&self, side: Side) -> Self {
        let (mut min, mut max) = (self.min, self.max);
        match side {
            Side::Top => min.y = max.y,
            Side::Bottom => max.y = min.y,
            Side::Left => max.x = min.x,
            Side::Right => min.x = max.x,
            Side::Front => max.z = min.z,
            Side::Back => min.z = max.z,
        }
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }

    #[inline]
    pub fn size(&self) -> (u32, u32, u32) {
        (
            self.min.x.abs_diff(self.max.x) + 1,
            self.min.y.abs_diff(self.max.y) + 1,
            self.min.z.abs_diff(self.max.z) + 1,
        )
    }

    pub fn volume(&self) -> u64 {
        let (sx, sy, sz) = self.size();
        u64::from(sx) * u64::from(sy) * u64::from(sz)
    }

    /// Chunks overlapped by this region.
    pub fn chunk_region(&self) -> ChunkRegion {
        ChunkRegion {
            min: self.min.chunk_pos(),
            max: self.max.chunk_pos(),
        }
    }

    /// Iterates x fastest, then z, then y.
    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| {
            (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| BlockPos::new(x, y, z)))
        })
    }
}

/// Inclusive box of chunk positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRegion {
    pub min: ChunkPos,
    pub max: ChunkPos,
}

impl ChunkRegion {
    pub fn new(a: ChunkPos, b: ChunkPos) -> Self {
        Self {
            min: ChunkPos::new(a.cx.min(b.cx), a.cy.min(b.cy), a.cz.min(b.cz)),
            max: ChunkPos::new(a.cx.max(b.cx), a.cy.max(b.cy), a.cz.max(b.cz)),
        }
    }

    #[inline]
    pub fn around(center: ChunkPos, radius: i32) -> Self {
        Self {
            min: center.offset(-radius, -radius, -radius),
            max: center.offset(radius, radius, radius),
        }
    }

    #[inline]
    pub fn contains(&self, pos: ChunkPos) -> bool {
        pos.cx >= self.min.cx
            && pos.cx <= self.max.cx
            && pos.cy >= self.min.cy
            && pos.cy <= self.max.cy
            && pos.cz >= self.min.cz
            && pos.cz <= self.max.cz
    }

    pub fn len(&self) -> usize {
        let sx = self.min.cx.abs_diff(self.max.cx) as usize + 1;
        let sy = self.min.cy.abs_diff(self.max.cy) as usize + 1;
        let sz = self.min.cz.abs_diff(self.max.cz) as usize + 1;
        sx * sy * sz
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Blocks covered by every chunk of the region.
    pub fn block_region(&self) -> BlockRegion {
        BlockRegion {
            min: self.min.block_region().min,
            max: self.max.block_region().max,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ChunkPos> + use<> {
        let (min, max) = (self.min, self.max);
        (min.cy..=max.cy).flat_map(move |cy| {
            (min.cz..=max.cz)
                .flat_map(move |cz| (min.cx..=max.cx).map(move |cx| ChunkPos::new(cx, cy, cz)))
        })
    }
}
