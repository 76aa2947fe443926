//! Block values, cube faces, texture atlas layout and per-block tile tables.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod config;
pub mod face;
pub mod tiles;
pub mod types;

pub use atlas::{AtlasLayout, GlyphAtlas, UvRect};
pub use config::{BlockDef, BlocksConfig, PlayerSkin};
pub use face::{Face, corner_offset, corner_signs};
pub use tiles::{BlockTiles, TileTable};
pub use types::{AIR, BlockValue, TileId};
