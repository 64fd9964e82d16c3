use serde::Deserialize;

use crate::types::BlockId;

// Top-level blocks file: a list of `[[blocks]]` tables.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockDef {
    pub name: String,
    // Explicit id; blocks without one get the lowest free id.
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub opaque: Option<bool>,
    #[serde(default)]
    pub translucent: Option<bool>,
    #[serde(default)]
    pub luminance: Option<u8>,
}

impl BlockDef {
    /// An opaque, non-emitting block.
    pub fn solid(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            opaque: Some(true),
            translucent: None,
            luminance: None,
        }
    }

    /// A block light passes through.
    pub fn clear(name: impl Into<String>) -> Self {
        Self {
            opaque: Some(false),
            ..Self::solid(name)
        }
    }

    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_luminance(mut self, luminance: u8) -> Self {
        self.luminance = Some(luminance);
        self
    }

    pub fn with_translucent(mut self, translucent: bool) -> Self {
        self.translucent = Some(translucent);
        self
    }
}

impl BlocksConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
