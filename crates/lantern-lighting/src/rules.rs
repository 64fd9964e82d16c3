use lantern_blocks::{BlockType, MAX_LIGHT};
use lantern_chunk::LightField;
use lantern_geom::{BlockPos, Side};

use crate::view::PropagatorWorldView;

/// How swapping one block type for another changes propagation across a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationComparison {
    MoreRestricted,
    Identical,
    MorePermissive,
}

impl PropagationComparison {
    #[inline]
    pub fn is_restricting(self) -> bool {
        self == PropagationComparison::MoreRestricted
    }

    #[inline]
    pub fn is_permitting(self) -> bool {
        self == PropagationComparison::MorePermissive
    }
}

/// Strategy describing one kind of light: its range, its sources, and how a
/// value decays from block to block.
pub trait PropagationRules {
    /// The field these rules write.
    fn field(&self) -> LightField;

    fn max_value(&self) -> u8;

    /// Value the block at `pos` holds regardless of its neighbours.
    fn fixed_value<W: PropagatorWorldView + ?Sized>(
        &self,
        world: &W,
        block: &BlockType,
        pos: BlockPos,
    ) -> u8;

    /// Value a neighbour across `side` receives from `existing` in `from`.
    fn propagate_value(&self, existing: u8, side: Side, from: &BlockType) -> u8;

    fn can_spread_out_of(&self, block: &BlockType, side: Side) -> bool;

    fn can_spread_into(&self, block: &BlockType, side: Side) -> bool;

    fn compare_propagation(
        &self,
        new: &BlockType,
        old: &BlockType,
        side: Side,
    ) -> PropagationComparison {
        let out = (self.can_spread_out_of(new, side), self.can_spread_out_of(old, side));
        let into = (self.can_spread_into(new, side), self.can_spread_into(old, side));
        let lost = |(new, old): (bool, bool)| old && !new;
        let gained = |(new, old): (bool, bool)| new && !old;
        if lost(out) || lost(into) {
            PropagationComparison::MoreRestricted
        } else if gained(out) || gained(into) {
            PropagationComparison::MorePermissive
        } else {
            PropagationComparison::Identical
        }
    }

    /// Whether changing `from` into `to` can affect this field at all.
    fn is_relevant(&self, from: &BlockType, to: &BlockType) -> bool {
        from.passes_light() != to.passes_light()
    }
}

/// Point light emitted by luminous blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct LightPropagationRules;

impl PropagationRules for LightPropagationRules {
    fn field(&self) -> LightField {
        LightField::Light
    }

    fn max_value(&self) -> u8 {
        MAX_LIGHT
    }

    fn fixed_value<W: PropagatorWorldView + ?Sized>(&self, _: &W, block: &BlockType, _: BlockPos) -> u8 {
        block.luminance
    }

    #[inline]
    fn propagate_value(&self, existing: u8, _: Side, _: &BlockType) -> u8 {
        existing.saturating_sub(1)
    }

    /// Emitters shine out of every face, opaque or not.
    #[inline]
    fn can_spread_out_of(&self, block: &BlockType, _: Side) -> bool {
        block.passes_light() || block.luminance > 0
    }

    #[inline]
    fn can_spread_into(&self, block: &BlockType, _: Side) -> bool {
        block.passes_light()
    }

    fn is_relevant(&self, from: &BlockType, to: &BlockType) -> bool {
        from.luminance != to.luminance || from.passes_light() != to.passes_light()
    }
}

/// Sunlight spreading out of lit columns. Sources come from the regen marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct SunlightPropagationRules;

impl PropagationRules for SunlightPropagationRules {
    fn field(&self) -> LightField {
        LightField::Sunlight
    }

    fn max_value(&self) -> u8 {
        MAX_LIGHT
    }

    fn fixed_value<W: PropagatorWorldView + ?Sized>(
        &self,
        world: &W,
        block: &BlockType,
        pos: BlockPos,
    ) -> u8 {
        if !block.passes_light() {
            return 0;
        }
        world.field_at(LightField::SunlightRegen, pos).unwrap_or(0)
    }

    #[inline]
    fn propagate_value(&self, existing: u8, _: Side, _: &BlockType) -> u8 {
        existing.saturating_sub(1)
    }

    #[inline]
    fn can_spread_out_of(&self, block: &BlockType, _: Side) -> bool {
        block.passes_light()
    }

    #[inline]
    fn can_spread_into(&self, block: &BlockType, _: Side) -> bool {
        block.passes_light()
    }
}

/// The column rule behind the regen marker.
///
/// A light-passing block with nothing loaded above it sees open sky and holds
/// the maximum. The maximum falls straight down undiminished until something
/// blocks it. Sideways it decays by one per block and, once decayed, does not
/// fall any further. Nothing travels up.
#[derive(Clone, Copy, Debug, Default)]
pub struct SunlightRegenPropagationRules;

impl PropagationRules for SunlightRegenPropagationRules {
    fn field(&self) -> LightField {
        LightField::SunlightRegen
    }

    fn max_value(&self) -> u8 {
        MAX_LIGHT
    }

    fn fixed_value<W: PropagatorWorldView + ?Sized>(
        &self,
        world: &W,
        block: &BlockType,
        pos: BlockPos,
    ) -> u8 {
        if block.passes_light() && world.value_at(pos.adjacent(Side::Top)).is_none() {
            MAX_LIGHT
        } else {
            0
        }
    }

    fn propagate_value(&self, existing: u8, side: Side, _: &BlockType) -> u8 {
        match side {
            Side::Top => 0,
            Side::Bottom if existing == MAX_LIGHT => MAX_LIGHT,
            Side::Bottom => 0,
            _ => existing.saturating_sub(1),
        }
    }

    #[inline]
    fn can_spread_out_of(&self, block: &BlockType, side: Side) -> bool {
        side != Side::Top && block.passes_light()
    }

    #[inline]
    fn can_spread_into(&self, block: &BlockType, _: Side) -> bool {
        block.passes_light()
    }
}
