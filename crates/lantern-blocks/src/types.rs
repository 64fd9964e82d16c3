/// Numeric block type id as stored in chunks.
pub type BlockId = u16;

/// Brightest value any light field can hold (4 bits).
pub const MAX_LIGHT: u8 = 15;

pub const AIR_ID: BlockId = 0;
/// Returned for positions whose chunk is not loaded.
pub const UNLOADED_ID: BlockId = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub opaque: bool,
    pub translucent: bool,
    pub luminance: u8,
}

impl BlockType {
    pub fn air() -> Self {
        Self {
            id: AIR_ID,
            name: "air".into(),
            opaque: false,
            translucent: true,
            luminance: 0,
        }
    }

    pub fn unloaded() -> Self {
        Self {
            id: UNLOADED_ID,
            name: "unloaded".into(),
            opaque: true,
            translucent: false,
            luminance: 0,
        }
    }

    /// Light (and sunlight) can enter and leave this block.
    #[inline]
    pub fn passes_light(&self) -> bool {
        self.translucent || !self.opaque
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == AIR_ID
    }

    #[inline]
    pub fn is_light_source(&self) -> bool {
        self.luminance > 0
    }
}
