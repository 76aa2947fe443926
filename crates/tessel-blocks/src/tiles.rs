use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use crate::config::{BlockDef, BlocksConfig};
use crate::face::Face;
use crate::types::{AIR, BlockValue, TileId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockTiles {
    /// Tile per face, indexed by `Face::index()`.
    pub faces: [TileId; 6],
    pub plant: Option<TileId>,
    pub transparent: bool,
}

impl BlockTiles {
    /// Every face shows `tile`.
    pub const fn uniform(tile: TileId) -> Self {
        Self {
            faces: [tile; 6],
            plant: None,
            transparent: false,
        }
    }

    /// The four side faces share `side`; top and bottom get their own tiles.
    pub fn sided(side: TileId, top: TileId, bottom: TileId) -> Self {
        let mut faces = [side; 6];
        faces[Face::PosY.index()] = top;
        faces[Face::NegY.index()] = bottom;
        Self {
            faces,
            plant: None,
            transparent: false,
        }
    }
}

/// Per-block-value tile assignment and opacity flags.
///
/// Values without an entry use their own value as the tile for every face
/// and are opaque (except air).
#[derive(Clone, Debug, Default)]
pub struct TileTable {
    entries: Vec<Option<BlockTiles>>,
    by_name: HashMap<String, BlockValue>,
}

impl TileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: BlockValue, tiles: BlockTiles) {
        let ix = usize::from(value);
        if self.entries.len() <= ix {
            self.entries.resize(ix + 1, None);
        }
        self.entries[ix] = Some(tiles);
    }

    #[inline]
    pub fn get(&self, value: BlockValue) -> Option<&BlockTiles> {
        self.entries.get(usize::from(value)).and_then(Option::as_ref)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockValue> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn face_tiles(&self, value: BlockValue) -> [TileId; 6] {
        self.get(value).map_or([value; 6], |t| t.faces)
    }

    #[inline]
    pub fn plant_tile(&self, value: BlockValue) -> Option<TileId> {
        self.get(value).and_then(|t| t.plant)
    }

    #[inline]
    pub fn is_plant(&self, value: BlockValue) -> bool {
        self.plant_tile(value).is_some()
    }

    /// Air, plants and blocks flagged transparent let neighbouring faces show.
    #[inline]
    pub fn is_transparent(&self, value: BlockValue) -> bool {
        value == AIR || self.get(value).is_some_and(|t| t.transparent || t.plant.is_some())
    }

    #[inline]
    pub fn is_opaque(&self, value: BlockValue) -> bool {
        !self.is_transparent(value)
    }

    pub fn from_defs(defs: &[BlockDef]) -> Result<Self, Box<dyn Error>> {
        let mut table = TileTable::new();
        for def in defs {
            if def.id == AIR {
                return Err("block id 0 is reserved for air".into());
            }
            if table.get(def.id).is_some() {
                return Err(format!("duplicate block id {}", def.id).into());
            }
            let base = def.tile.unwrap_or(def.id);
            let mut tiles = BlockTiles::sided(
                def.side.unwrap_or(base),
                def.top.unwrap_or(base),
                def.bottom.unwrap_or(base),
            );
            tiles.plant = def.plant;
            tiles.transparent = def.transparent.unwrap_or(false);
            table.insert(def.id, tiles);
            if let Some(name) = &def.name {
                if table.by_name.insert(name.clone(), def.id).is_some() {
                    log::warn!("block name '{}' reused by id {}", name, def.id);
                }
            }
        }
        log::debug!("tile table: {} block definitions", defs.len());
        Ok(table)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_defs(&cfg.blocks)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
