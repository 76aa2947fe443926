use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tessel_blocks::{AtlasLayout, BlockDef, GlyphAtlas, PlayerSkin, TileTable};
use tessel_lighting::ResolverConfig;

pub const DEFAULT_CONFIG_PATH: &str = "assets/tessel.toml";

#[derive(Clone, Debug, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_chunk_size")] pub chunk_size: i32,
    #[serde(default = "default_seed")] pub seed: i32,
    #[serde(default = "default_base_height")] pub base_height: i32,
    #[serde(default = "default_height_amplitude")] pub height_amplitude: f32,
    #[serde(default = "default_height_frequency")] pub height_frequency: f32,
    /// Share of grass columns that grow a plant, 0..=1.
    #[serde(default = "default_plant_density")] pub plant_density: f32,
    /// Light-stone lamp at the middle of every chunk.
    #[serde(default)] pub lamps: bool,
}

fn default_chunk_size() -> i32 { 32 }
fn default_seed() -> i32 { 1337 }
fn default_base_height() -> i32 { 16 }
fn default_height_amplitude() -> f32 { 12.0 }
fn default_height_frequency() -> f32 { 0.01 }
fn default_plant_density() -> f32 { 0.05 }

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            seed: default_seed(),
            base_height: default_base_height(),
            height_amplitude: default_height_amplitude(),
            height_frequency: default_height_frequency(),
            plant_density: default_plant_density(),
            lamps: false,
        }
    }
}

/// Everything the demo reads from its TOML file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TesselConfig {
    #[serde(default)] pub atlas: AtlasLayout,
    #[serde(default)] pub glyphs: GlyphAtlas,
    #[serde(default)] pub player: PlayerSkin,
    #[serde(default)] pub resolver: ResolverConfig,
    #[serde(default)] pub world: WorldConfig,
    #[serde(default)] pub blocks: Vec<BlockDef>,
}

impl TesselConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: TesselConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Reads `path`, else `assets/tessel.toml` when it exists, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        if let Some(path) = path {
            log::info!("config: {}", path.display());
            return Self::from_path(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            log::info!("config: {}", fallback.display());
            Self::from_path(fallback)
        } else {
            log::warn!("config: {} not found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.world.chunk_size <= 0 {
            return Err(format!("world.chunk_size must be positive, got {}", self.world.chunk_size).into());
        }
        if !(0.0..=1.0).contains(&self.world.plant_density) {
            return Err(format!("world.plant_density must be in 0..=1, got {}", self.world.plant_density).into());
        }
        if self.resolver.max_light == 0 {
            return Err("resolver.max_light must be at least 1".into());
        }
        if self.glyphs.glyph_count() == 0 {
            return Err(format!(
                "glyphs.first_code {} is past glyphs.last_code {}",
                self.glyphs.first_code, self.glyphs.last_code
            )
            .into());
        }
        Ok(())
    }

    pub fn tile_table(&self) -> Result<TileTable, Box<dyn Error>> {
        TileTable::from_defs(&self.blocks)
    }
}
