use std::fs;
use std::path::{Path, PathBuf};

use lantern_blocks::{BlockDef, BlockRegistry, RegistryError};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use crate::WorldInfo;
use crate::loader::FlatGenerator;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read world config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid world config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("generator fill block `{0}` is not registered")]
    UnknownBlock(String),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

/// A world definition: identity, streaming parameters, the flat test
/// generator and the block table.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub seed: String,
    #[serde(default = "default_extra_data_slots")]
    pub extra_data_slots: usize,
    /// Chunks loaded in each direction around the origin.
    #[serde(default = "default_view_radius")]
    pub view_radius: u32,
    /// Generation threads; 0 lets rayon pick.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GeneratorConfig {
    /// Highest solid y. Everything above is air.
    #[serde(default = "default_surface")]
    pub surface: i32,
    #[serde(default = "default_fill")]
    pub fill: String,
}

fn default_title() -> String {
    "lantern".to_string()
}
fn default_extra_data_slots() -> usize {
    1
}
fn default_view_radius() -> u32 {
    1
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_surface() -> i32 {
    40
}
fn default_fill() -> String {
    "stone".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            surface: default_surface(),
            fill: default_fill(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            seed: String::new(),
            extra_data_slots: default_extra_data_slots(),
            view_radius: default_view_radius(),
            workers: 0,
            log_level: default_log_level(),
            generator: GeneratorConfig::default(),
            blocks: vec![BlockDef::solid("stone")],
        }
    }
}

impl WorldConfig {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn world_info(&self) -> WorldInfo {
        WorldInfo::new(self.title.clone(), self.seed.clone())
    }

    pub fn build_registry(&self) -> Result<BlockRegistry, ConfigError> {
        Ok(BlockRegistry::from_defs(self.blocks.iter().cloned())?)
    }

    pub fn flat_generator(&self, registry: &BlockRegistry) -> Result<FlatGenerator, ConfigError> {
        let fill = registry
            .id_by_name(&self.generator.fill)
            .ok_or_else(|| ConfigError::UnknownBlock(self.generator.fill.clone()))?;
        Ok(FlatGenerator::new(self.generator.surface, fill))
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
