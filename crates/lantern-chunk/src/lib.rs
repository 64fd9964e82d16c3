//! Chunk storage: block ids, packed light fields, extra data and dirty flags.
#![forbid(unsafe_code)]

mod chunk;
mod dirty;
mod nibble;
mod provider;

pub use chunk::{Chunk, LightField};
pub use dirty::{DirtyListener, DirtyLog, DirtyTracker};
pub use nibble::NibbleArray;
pub use provider::{ChunkProvider, ChunkStore};
