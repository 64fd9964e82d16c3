#![allow(dead_code)]

use hashbrown::HashMap;
use lantern_blocks::{AIR_ID, BlockDef, BlockId, BlockRegistry, UNLOADED_ID};
use lantern_chunk::LightField;
use lantern_geom::{BlockPos, BlockRegion};
use lantern_lighting::PropagatorWorldView;

pub struct Palette {
    pub registry: BlockRegistry,
    pub air: BlockId,
    pub full_light: BlockId,
    pub weak_light: BlockId,
    pub medium_light: BlockId,
    pub solid: BlockId,
    pub solid_medium_light: BlockId,
}

pub fn palette() -> Palette {
    let registry = BlockRegistry::from_defs([
        BlockDef::solid("torch").with_translucent(true).with_luminance(15),
        BlockDef::solid("weak_light").with_translucent(true).with_luminance(2),
        BlockDef::solid("medium_light").with_translucent(true).with_luminance(5),
        BlockDef::solid("stone"),
        BlockDef::solid("solid_medium_light").with_luminance(5),
    ])
    .expect("palette");
    let id = |name: &str| registry.id_by_name(name).expect(name);
    Palette {
        air: AIR_ID,
        full_light: id("torch"),
        weak_light: id("weak_light"),
        medium_light: id("medium_light"),
        solid: id("stone"),
        solid_medium_light: id("solid_medium_light"),
        registry,
    }
}

/// A bounded single-field world. Positions outside `region` are unavailable.
pub struct StubWorld {
    region: BlockRegion,
    fill: BlockId,
    blocks: HashMap<BlockPos, BlockId>,
    values: HashMap<BlockPos, u8>,
}

impl StubWorld {
    pub fn new(region: BlockRegion, fill: BlockId) -> Self {
        Self {
            region,
            fill,
            blocks: HashMap::new(),
            values: HashMap::new(),
        }
    }

    /// The region most scenarios run in: three chunks across on each axis.
    pub fn testing(fill: BlockId) -> Self {
        Self::new(
            BlockRegion::new(BlockPos::new(-32, -64, -32), BlockPos::new(64, 128, 64)),
            fill,
        )
    }

    /// Exactly one chunk at the origin.
    pub fn single_chunk(fill: BlockId) -> Self {
        Self::new(
            BlockRegion::new(BlockPos::new(0, 0, 0), BlockPos::new(31, 63, 31)),
            fill,
        )
    }

    pub fn set_block(&mut self, pos: BlockPos, id: BlockId) {
        self.blocks.insert(pos, id);
    }

    pub fn value(&self, pos: BlockPos) -> u8 {
        self.value_at(pos).expect("inside stub region")
    }
}

impl PropagatorWorldView for StubWorld {
    fn value_at(&self, pos: BlockPos) -> Option<u8> {
        self.region
            .contains(pos)
            .then(|| self.values.get(&pos).copied().unwrap_or(0))
    }

    fn set_value_at(&mut self, pos: BlockPos, value: u8) -> Option<u8> {
        if !self.region.contains(pos) {
            return None;
        }
        Some(self.values.insert(pos, value).unwrap_or(0))
    }

    fn block_at(&self, pos: BlockPos) -> BlockId {
        if self.region.contains(pos) {
            self.blocks.get(&pos).copied().unwrap_or(self.fill)
        } else {
            UNLOADED_ID
        }
    }

    fn field_at(&self, _: LightField, _: BlockPos) -> Option<u8> {
        None
    }
}

/// Every position at Manhattan distance exactly `radius` from `center`.
pub fn diamond_shell(center: BlockPos, radius: i32) -> Vec<BlockPos> {
    let mut out = Vec::new();
    for dx in -radius..=radius {
        let rest = radius - dx.abs();
        for dy in -rest..=rest {
            let dz = rest - dy.abs();
            out.push(center.offset(dx, dy, dz));
            if dz != 0 {
                out.push(center.offset(dx, dy, -dz));
            }
        }
    }
    out
}
