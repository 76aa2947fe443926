use std::time::Instant;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use hashbrown::HashMap;
use rayon::prelude::*;
use tessel_blocks::{BlockValue, TileTable};
use tessel_map::{ChunkKey, MapError, VoxelMap, hash_coords};
use tessel_mesh_cpu::ChunkNeighborhood;

use crate::config::WorldConfig;

/// Blocks of dirt between the grass and the stone.
const DIRT_DEPTH: i32 = 3;
const LAMP_LIGHT: BlockValue = 15;
const PLANT_NAMES: [&str; 7] = [
    "tall_grass",
    "yellow_flower",
    "red_flower",
    "purple_flower",
    "sun_flower",
    "white_flower",
    "blue_flower",
];

#[inline]
fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis() as u32
}

/// Block ids the generator places, resolved by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub grass: BlockValue,
    pub dirt: BlockValue,
    pub stone: BlockValue,
    pub lamp: Option<BlockValue>,
    pub plants: Vec<BlockValue>,
}

impl Palette {
    pub fn from_tiles(tiles: &TileTable) -> Self {
        let named = |name: &str, fallback: BlockValue| tiles.id_by_name(name).unwrap_or(fallback);
        Self {
            grass: named("grass", 1),
            dirt: named("dirt", 7),
            stone: named("stone", 3),
            lamp: tiles.id_by_name("light_stone"),
            plants: PLANT_NAMES
                .iter()
                .filter_map(|n| tiles.id_by_name(n))
                .filter(|&v| tiles.is_plant(v))
                .collect(),
        }
    }
}

/// Blocks and light levels of one chunk.
#[derive(Clone, Debug)]
pub struct ChunkData {
    pub key: ChunkKey,
    pub blocks: VoxelMap,
    pub lights: VoxelMap,
}

/// Height-field terrain: grass over dirt over stone, with scattered plants.
pub struct Terrain {
    params: WorldConfig,
    palette: Palette,
    heights: FastNoiseLite,
}

impl Terrain {
    pub fn new(params: WorldConfig, palette: Palette) -> Self {
        let mut heights = FastNoiseLite::with_seed(params.seed);
        heights.set_noise_type(Some(NoiseType::OpenSimplex2));
        heights.set_frequency(Some(params.height_frequency));
        Self {
            params,
            palette,
            heights,
        }
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.params.chunk_size
    }

    /// Number of solid blocks in column `(x, z)`; the surface block sits at `height - 1`.
    pub fn height(&self, x: i32, z: i32) -> i32 {
        let h = self.heights.get_noise_2d(x as f32, z as f32);
        (self.params.base_height + (h * self.params.height_amplitude) as i32).max(1)
    }

    fn plant_at(&self, x: i32, z: i32) -> Option<BlockValue> {
        if self.palette.plants.is_empty() {
            return None;
        }
        let roll = hash_coords(x, self.params.seed, z);
        let chance = (roll & 0xffff) as f32 / 65536.0;
        (chance < self.params.plant_density)
            .then(|| self.palette.plants[(roll >> 16) as usize % self.palette.plants.len()])
    }

    pub fn generate(&self, key: ChunkKey) -> Result<ChunkData, MapError> {
        let size = self.params.chunk_size;
        let p = &self.palette;
        let mut blocks = VoxelMap::for_chunk(key, size)?;
        let mut lights = VoxelMap::alloc(blocks.offset(), 0xf)?;
        for x in key.x_range(size) {
            for z in key.z_range(size) {
                let h = self.height(x, z);
                for y in 0..h {
                    let value = if y == h - 1 {
                        p.grass
                    } else if y >= h - 1 - DIRT_DEPTH {
                        p.dirt
                    } else {
                        p.stone
                    };
                    blocks.set(x, y, z, value)?;
                }
                if let Some(plant) = self.plant_at(x, z) {
                    blocks.set(x, h, z, plant)?;
                }
            }
        }
        if let (true, Some(lamp)) = (self.params.lamps, p.lamp) {
            let x = key.p * size + size / 2;
            let z = key.q * size + size / 2;
            let y = self.height(x, z) - 1;
            blocks.set(x, y, z, lamp)?;
            lights.set(x, y, z, LAMP_LIGHT)?;
            lights.set(x, y + 1, z, LAMP_LIGHT)?;
        }
        Ok(ChunkData {
            key,
            blocks,
            lights,
        })
    }
}

/// Square of chunks `radius` around `center`, row by row.
pub fn region(center: ChunkKey, radius: i32) -> Vec<ChunkKey> {
    (-radius..=radius)
        .flat_map(|dp| (-radius..=radius).map(move |dq| center.offset(dp, dq)))
        .collect()
}

/// Loaded chunks by key.
#[derive(Debug, Default)]
pub struct World {
    pub chunk_size: i32,
    chunks: HashMap<ChunkKey, ChunkData>,
}

impl World {
    /// Generates every chunk in `keys` on the rayon pool.
    pub fn generate(terrain: &Terrain, keys: &[ChunkKey]) -> Result<Self, MapError> {
        let start = Instant::now();
        let generated = keys
            .par_iter()
            .map(|&key| terrain.generate(key))
            .collect::<Result<Vec<_>, _>>()?;
        let mut chunks = HashMap::with_capacity(generated.len());
        for chunk in generated {
            chunks.insert(chunk.key, chunk);
        }
        let world = Self {
            chunk_size: terrain.chunk_size(),
            chunks,
        };
        log::info!(
            target: "perf",
            "ms total={} world_gen chunks={} entries={}",
            elapsed_ms(start),
            world.len(),
            world.entries()
        );
        Ok(world)
    }

    #[inline]
    pub fn get(&self, key: ChunkKey) -> Option<&ChunkData> {
        self.chunks.get(&key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Block map entries across all chunks.
    pub fn entries(&self) -> usize {
        self.chunks.values().map(|c| c.blocks.len()).sum()
    }

    /// Copies of the block and light maps around `key`, owned by the caller so
    /// meshing never reads maps that may change underneath it.
    pub fn snapshot(&self, key: ChunkKey) -> Result<Snapshot, MapError> {
        let mut snap = Snapshot {
            key,
            size: self.chunk_size,
            blocks: Default::default(),
            lights: Default::default(),
        };
        for dp in -1..=1 {
            for dq in -1..=1 {
                let Some(chunk) = self.get(key.offset(dp, dq)) else {
                    continue;
                };
                let i = Snapshot::slot(dp, dq);
                snap.blocks[i] = Some(copy_map(&chunk.blocks)?);
                snap.lights[i] = Some(copy_map(&chunk.lights)?);
            }
        }
        Ok(snap)
    }
}

fn copy_map(src: &VoxelMap) -> Result<VoxelMap, MapError> {
    let mut dst = VoxelMap::alloc(src.offset(), 0)?;
    dst.copy_from(src)?;
    Ok(dst)
}

/// Private copy of a chunk and its eight neighbours.
#[derive(Debug)]
pub struct Snapshot {
    pub key: ChunkKey,
    pub size: i32,
    blocks: [Option<VoxelMap>; 9],
    lights: [Option<VoxelMap>; 9],
}

impl Snapshot {
    #[inline]
    fn slot(dp: i32, dq: i32) -> usize {
        ((dp + 1) * 3 + (dq + 1)) as usize
    }

    pub fn loaded(&self) -> usize {
        self.blocks.iter().flatten().count()
    }

    pub fn neighborhood(&self) -> ChunkNeighborhood<'_> {
        let mut hood = ChunkNeighborhood::new(self.key, self.size);
        for dp in -1..=1 {
            for dq in -1..=1 {
                let i = Self::slot(dp, dq);
                if let Some(map) = &self.blocks[i] {
                    hood = hood.with_blocks(dp, dq, map);
                }
                if let Some(map) = &self.lights[i] {
                    hood = hood.with_lights(dp, dq, map);
                }
            }
        }
        hood
    }
}
