use std::f32::consts::TAU;
use std::time::Instant;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use tessel_blocks::{AIR, AtlasLayout, BlockValue, TileId, TileTable};
use tessel_geom::{Aabb, Vec3};
use tessel_lighting::{BlockFaces, LightSource, Resolver, ResolverConfig, VoxelSource};
use tessel_map::{ChunkKey, VoxelMap};

use crate::buffer::{VertexBuffer, VertexFormat};
use crate::cube::{CubeFaces, make_cube_faces};
use crate::error::MeshError;
use crate::plant::make_plant;

const PLANT_NOISE_FREQUENCY: f32 = 0.25;

#[inline]
fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis() as u32
}

/// A chunk and the eight around it, as seen by the mesher. Chunks that are not
/// loaded read as outside the world.
#[derive(Clone, Copy, Debug)]
pub struct ChunkNeighborhood<'a> {
    pub key: ChunkKey,
    pub size: i32,
    blocks: [Option<&'a VoxelMap>; 9],
    lights: [Option<&'a VoxelMap>; 9],
}

impl<'a> ChunkNeighborhood<'a> {
    pub fn new(key: ChunkKey, size: i32) -> Self {
        Self {
            key,
            size,
            blocks: [None; 9],
            lights: [None; 9],
        }
    }

    #[inline]
    fn slot_of(dp: i32, dq: i32) -> Option<usize> {
        ((-1..=1).contains(&dp) && (-1..=1).contains(&dq)).then(|| ((dp + 1) * 3 + (dq + 1)) as usize)
    }

    /// Registers the block map of chunk `key + (dp, dq)`.
    pub fn with_blocks(mut self, dp: i32, dq: i32, map: &'a VoxelMap) -> Self {
        if let Some(i) = Self::slot_of(dp, dq) {
            self.blocks[i] = Some(map);
        }
        self
    }

    pub fn with_lights(mut self, dp: i32, dq: i32, map: &'a VoxelMap) -> Self {
        if let Some(i) = Self::slot_of(dp, dq) {
            self.lights[i] = Some(map);
        }
        self
    }

    #[inline]
    pub fn center(&self) -> Option<&'a VoxelMap> {
        self.blocks[4]
    }

    #[inline]
    fn slot(&self, x: i32, z: i32) -> Option<usize> {
        let owner = ChunkKey::of_block(x, z, self.size);
        Self::slot_of(owner.p - self.key.p, owner.q - self.key.q)
    }
}

impl VoxelSource for ChunkNeighborhood<'_> {
    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockValue> {
        self.slot(x, z)
            .and_then(|i| self.blocks[i])
            .map(|m| m.get(x, y, z))
    }
}

impl LightSource for ChunkNeighborhood<'_> {
    fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        self.slot(x, z)
            .and_then(|i| self.lights[i])
            .map_or(0, |m| m.light(x, y, z))
    }
}

/// Geometry of one chunk.
#[derive(Clone, Debug)]
pub struct ChunkMesh {
    pub key: ChunkKey,
    pub faces: usize,
    pub miny: i32,
    pub maxy: i32,
    pub buffer: VertexBuffer,
}

impl ChunkMesh {
    /// Bounding column for culling.
    pub fn bounds(&self, size: i32) -> Aabb {
        Aabb::chunk_column(self.key.p, self.key.q, size, self.miny, self.maxy)
    }
}

enum Emit {
    Cube(CubeFaces),
    Plant { ao: f32, light: f32, tile: TileId },
}

/// Builds chunk meshes: resolves every block of the centre chunk and emits
/// cubes and plants into a single `Block` buffer.
pub struct ChunkMesher<'a> {
    resolver: Resolver<'a>,
    atlas: AtlasLayout,
    plant_noise: FastNoiseLite,
}

impl<'a> ChunkMesher<'a> {
    pub fn new(tiles: &'a TileTable, config: &'a ResolverConfig, atlas: AtlasLayout, seed: i32) -> Self {
        let mut plant_noise = FastNoiseLite::with_seed(seed);
        plant_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        plant_noise.set_frequency(Some(PLANT_NOISE_FREQUENCY));
        Self {
            resolver: Resolver::new(tiles, config),
            atlas,
            plant_noise,
        }
    }

    #[inline]
    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    /// Stable yaw in radians for a plant at column `(x, z)`.
    pub fn plant_rotation(&self, x: i32, z: i32) -> f32 {
        let n = self.plant_noise.get_noise_2d(x as f32, z as f32);
        (n + 1.0) * 0.5 * TAU
    }

    pub fn build(&self, hood: &ChunkNeighborhood<'_>) -> Result<ChunkMesh, MeshError> {
        let start = Instant::now();
        let key = hood.key;
        let size = hood.size;
        let (xs, zs) = (key.x_range(size), key.z_range(size));
        let tiles = self.resolver.tiles();

        let mut pending = Vec::new();
        let mut faces = 0usize;
        let mut miny = i32::MAX;
        let mut maxy = i32::MIN;
        let mut blocks = 0usize;
        if let Some(center) = hood.center() {
            for (x, y, z, value) in center.iter() {
                if value == AIR || !xs.contains(&x) || !zs.contains(&z) {
                    continue;
                }
                blocks += 1;
                let resolved: BlockFaces = self.resolver.resolve(hood, hood, x, y, z);
                if !resolved.any_visible() {
                    continue;
                }
                let emit = match tiles.plant_tile(value) {
                    Some(tile) => {
                        let (ao, light) = resolved.plant_shading();
                        faces += 4;
                        Emit::Plant { ao, light, tile }
                    }
                    None => {
                        faces += resolved.visible_count();
                        Emit::Cube(CubeFaces::from(&resolved))
                    }
                };
                miny = miny.min(y);
                maxy = maxy.max(y);
                pending.push((x, y, z, emit));
            }
        }
        let scan_ms = elapsed_ms(start);

        let mut buffer = VertexBuffer::with_faces(VertexFormat::Block, faces)?;
        for (x, y, z, emit) in pending {
            let center = Vec3::from_i32(x, y, z);
            match emit {
                Emit::Cube(f) => {
                    make_cube_faces(&mut buffer, &self.atlas, &f, center, Vec3::splat(0.5))?;
                }
                Emit::Plant { ao, light, tile } => {
                    let rotation = self.plant_rotation(x, z);
                    make_plant(&mut buffer, &self.atlas, ao, light, center, 0.5, tile, rotation)?;
                }
            }
        }
        if faces == 0 {
            miny = 0;
            maxy = 0;
        }
        log::info!(
            target: "perf",
            "ms scan={} total={} chunk_mesh p={} q={} blocks={} faces={}",
            scan_ms,
            elapsed_ms(start),
            key.p,
            key.q,
            blocks,
            faces
        );
        Ok(ChunkMesh {
            key,
            faces,
            miny,
            maxy,
            buffer,
        })
    }
}
