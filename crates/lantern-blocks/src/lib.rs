//! Block types, the id registry, and TOML block definitions.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use config::{BlockDef, BlocksConfig};
pub use registry::{BlockRegistry, RegistryError};
pub use types::{AIR_ID, BlockId, BlockType, MAX_LIGHT, UNLOADED_ID};
