//! Sparse voxel storage: an open-addressing map from block coordinates to values.
#![forbid(unsafe_code)]

mod chunk;
mod error;
mod hash;
mod map;

pub use chunk::{CHUNK_MAP_MASK, ChunkKey, chunked};
pub use error::MapError;
pub use hash::{hash_coords, hash_int};
pub use map::{Iter, LOAD_FACTOR_DENOM, VoxelMap};
