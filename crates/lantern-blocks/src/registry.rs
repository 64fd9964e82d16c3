use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{BlockDef, BlocksConfig};
use crate::types::{AIR_ID, BlockId, BlockType, MAX_LIGHT, UNLOADED_ID};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read block config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid block config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate block name `{0}`")]
    DuplicateName(String),
    #[error("block id {id} is claimed by both `{first}` and `{second}`")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },
    #[error("block `{name}` uses reserved id {id}")]
    ReservedId { name: String, id: BlockId },
    #[error("block `{name}` has luminance {luminance}, above the maximum of {MAX_LIGHT}")]
    LuminanceOutOfRange { name: String, luminance: u8 },
    #[error("ran out of block ids")]
    IdsExhausted,
}

/// Id-indexed block table. `air` and `unloaded` are always present.
#[derive(Clone, Debug)]
pub struct BlockRegistry {
    blocks: Vec<Option<BlockType>>,
    by_name: HashMap<String, BlockId>,
}

impl Default for BlockRegistry {
    fn default() -> Self {
        let mut reg = Self {
            blocks: Vec::new(),
            by_name: HashMap::new(),
        };
        reg.insert(BlockType::air());
        reg.insert(BlockType::unloaded());
        reg
    }
}

impl BlockRegistry {
    /// Registry holding only the built-in blocks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(s)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        Self::from_defs(cfg.blocks)
    }

    pub fn from_defs(defs: impl IntoIterator<Item = BlockDef>) -> Result<Self, RegistryError> {
        let mut reg = Self::default();
        let defs: Vec<BlockDef> = defs.into_iter().collect();
        // Explicit ids first so auto-assigned ones fill around them.
        let (explicit, auto): (Vec<_>, Vec<_>) = defs.into_iter().partition(|d| d.id.is_some());
        for def in explicit {
            if let Some(id) = def.id {
                reg.register(def, id)?;
            }
        }
        let mut next: BlockId = UNLOADED_ID + 1;
        for def in auto {
            while reg.get(next).is_some() {
                next = next.checked_add(1).ok_or(RegistryError::IdsExhausted)?;
            }
            reg.register(def, next)?;
        }
        log::debug!(target: "blocks", "block registry built with {} types", reg.len());
        Ok(reg)
    }

    fn register(&mut self, def: BlockDef, id: BlockId) -> Result<(), RegistryError> {
        if id == AIR_ID || id == UNLOADED_ID {
            return Err(RegistryError::ReservedId { name: def.name, id });
        }
        if self.by_name.contains_key(&def.name) {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if let Some(existing) = self.get(id) {
            return Err(RegistryError::DuplicateId {
                id,
                first: existing.name.clone(),
                second: def.name,
            });
        }
        let luminance = def.luminance.unwrap_or(0);
        if luminance > MAX_LIGHT {
            return Err(RegistryError::LuminanceOutOfRange {
                name: def.name,
                luminance,
            });
        }
        self.insert(BlockType {
            id,
            name: def.name,
            opaque: def.opaque.unwrap_or(true),
            translucent: def.translucent.unwrap_or(false),
            luminance,
        });
        Ok(())
    }

    fn insert(&mut self, ty: BlockType) {
        let idx = ty.id as usize;
        if self.blocks.len() <= idx {
            self.blocks.resize(idx + 1, None);
        }
        self.by_name.insert(ty.name.clone(), ty.id);
        self.blocks[idx] = Some(ty);
    }

    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).and_then(Option::as_ref)
    }

    /// Like [`get`](Self::get) but unknown ids resolve to the `unloaded` sentinel.
    #[inline]
    pub fn block(&self, id: BlockId) -> &BlockType {
        self.get(id).unwrap_or_else(|| self.unloaded())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&BlockType> {
        self.id_by_name(name).and_then(|id| self.get(id))
    }

    pub fn air(&self) -> &BlockType {
        self.block(AIR_ID)
    }

    pub fn unloaded(&self) -> &BlockType {
        match self.blocks.get(UNLOADED_ID as usize) {
            Some(Some(ty)) => ty,
            _ => unreachable!("registry always holds the unloaded sentinel"),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter().flatten()
    }
}
