//! TOML-facing configuration for blocks, atlases and the player skin.

use serde::Deserialize;

use crate::atlas::{AtlasLayout, GlyphAtlas};
use crate::types::{BlockValue, TileId};

/// One `[[blocks]]` entry.
///
/// `tile` sets all six faces; `side`/`top`/`bottom` override it per face role.
/// A `plant` tile turns the block into a cross-billboard.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlockDef {
    pub id: BlockValue,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tile: Option<TileId>,
    #[serde(default)]
    pub side: Option<TileId>,
    #[serde(default)]
    pub top: Option<TileId>,
    #[serde(default)]
    pub bottom: Option<TileId>,
    #[serde(default)]
    pub plant: Option<TileId>,
    #[serde(default)]
    pub transparent: Option<bool>,
}

/// Six-face tiles for each part of the player model, in face-index order.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSkin {
    pub head: [TileId; 6],
    pub body: [TileId; 6],
    pub arm: [TileId; 6],
    pub leg: [TileId; 6],
}

impl Default for PlayerSkin {
    fn default() -> Self {
        Self {
            head: [226, 224, 241, 209, 225, 227],
            body: [230, 230, 246, 214, 229, 231],
            arm: [234, 234, 250, 218, 233, 235],
            leg: [238, 238, 254, 222, 237, 239],
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub atlas: AtlasLayout,
    #[serde(default)]
    pub glyphs: GlyphAtlas,
    #[serde(default)]
    pub player: PlayerSkin,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}
