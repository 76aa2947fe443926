use tessel_blocks::{AIR, BlockValue, Face, TileId, TileTable, corner_offset};

use crate::config::{BoundaryPolicy, LightAggregate, ResolverConfig};
use crate::source::{LightSource, VoxelSource};

/// Cells in the 3×3×3 block around (and including) the resolved block.
pub const NEIGHBORHOOD: usize = 27;

/// Index of offset `(dx, dy, dz)` (each in `-1..=1`) in a [`Neighborhood`].
#[inline]
pub const fn cell_index(dx: i32, dy: i32, dz: i32) -> usize {
    ((dx + 1) * 9 + (dy + 1) * 3 + (dz + 1)) as usize
}

const CENTER: usize = cell_index(0, 0, 0);

/// Neighborhood cells for corner `j` of `face`: `[corner, side1, side2, face]`.
///
/// All four lie in the layer directly in front of the face. The corner cell is
/// diagonal to the face-adjacent cell; the two sides share one tangent with it.
pub fn corner_cells(face: Face, corner: usize) -> [usize; 4] {
    let c = corner_offset(face, corner);
    let (t1, t2) = face.tangents();
    let mut side1 = c;
    side1[t2] = 0;
    let mut side2 = c;
    side2[t1] = 0;
    let mut front = c;
    front[t1] = 0;
    front[t2] = 0;
    let ix = |p: [i32; 3]| cell_index(p[0], p[1], p[2]);
    [ix(c), ix(side1), ix(side2), ix(front)]
}

/// Sampled 3×3×3 surroundings of one block.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    pub opaque: [bool; NEIGHBORHOOD],
    pub light: [u8; NEIGHBORHOOD],
    /// Sky shade per cell in `[0, 1]`; zero when sky shading is off.
    pub shade: [f32; NEIGHBORHOOD],
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self {
            opaque: [false; NEIGHBORHOOD],
            light: [0; NEIGHBORHOOD],
            shade: [0.0; NEIGHBORHOOD],
        }
    }
}

/// Per-face output of the resolver. AO is occlusion (1 = fully dark), light is brightness.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FaceDescriptor {
    pub visible: bool,
    pub tile: TileId,
    pub ao: [f32; 4],
    pub light: [f32; 4],
}

/// The six faces of one resolved block, in `Face::index()` order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BlockFaces {
    pub value: BlockValue,
    pub faces: [FaceDescriptor; 6],
}

impl BlockFaces {
    #[inline]
    pub fn face(&self, face: Face) -> &FaceDescriptor {
        &self.faces[face.index()]
    }

    pub fn visible_count(&self) -> usize {
        self.faces.iter().filter(|f| f.visible).count()
    }

    #[inline]
    pub fn any_visible(&self) -> bool {
        self.faces.iter().any(|f| f.visible)
    }

    pub fn visibility(&self) -> [bool; 6] {
        self.faces.map(|f| f.visible)
    }

    pub fn tiles(&self) -> [TileId; 6] {
        self.faces.map(|f| f.tile)
    }

    pub fn ao(&self) -> [[f32; 4]; 6] {
        self.faces.map(|f| f.ao)
    }

    pub fn light(&self) -> [[f32; 4]; 6] {
        self.faces.map(|f| f.light)
    }

    /// Single shading pair for a plant: least occluded corner, brightest corner.
    pub fn plant_shading(&self) -> (f32, f32) {
        let mut ao = 1.0f32;
        let mut light = 0.0f32;
        for f in &self.faces {
            for j in 0..4 {
                ao = ao.min(f.ao[j]);
                light = light.max(f.light[j]);
            }
        }
        (ao, light)
    }
}

/// Computes face exposure and per-corner AO/light from a block's neighborhood.
///
/// Holds only borrowed, read-only state, so one resolver can be shared by
/// any number of meshing threads.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    tiles: &'a TileTable,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(tiles: &'a TileTable, config: &'a ResolverConfig) -> Self {
        if config.ao_curve.windows(2).any(|w| w[1] < w[0]) {
            log::warn!("resolver: ao_curve {:?} is not increasing", config.ao_curve);
        }
        Self { tiles, config }
    }

    #[inline]
    pub fn config(&self) -> &ResolverConfig {
        self.config
    }

    #[inline]
    pub fn tiles(&self) -> &TileTable {
        self.tiles
    }

    #[inline]
    fn opaque_at<V: VoxelSource + ?Sized>(&self, voxels: &V, x: i32, y: i32, z: i32) -> bool {
        match voxels.voxel(x, y, z) {
            Some(v) => v != AIR && self.tiles.is_opaque(v),
            None => self.config.boundary == BoundaryPolicy::Occupied,
        }
    }

    /// `1 - k/depth` for the first opaque cell `k` steps up the column from `(x, y, z)`.
    fn sky_shade<V: VoxelSource + ?Sized>(&self, voxels: &V, x: i32, y: i32, z: i32) -> f32 {
        let depth = self.config.sky_shade_depth;
        for k in 0..depth {
            let opaque = match y.checked_add(i32::from(k)) {
                Some(cy) => self.opaque_at(voxels, x, cy, z),
                None => self.edge_is_occupied(),
            };
            if opaque {
                return 1.0 - f32::from(k) / f32::from(depth);
            }
        }
        0.0
    }

    /// Cells past the `i32` range read like unloaded cells.
    #[inline]
    fn edge_is_occupied(&self) -> bool {
        self.config.boundary == BoundaryPolicy::Occupied
    }

    /// Samples opacity, light and sky shade for the 27 cells around `(x, y, z)`.
    pub fn gather<V, L>(&self, voxels: &V, lights: &L, x: i32, y: i32, z: i32) -> Neighborhood
    where
        V: VoxelSource + ?Sized,
        L: LightSource + ?Sized,
    {
        let mut n = Neighborhood::default();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let i = cell_index(dx, dy, dz);
                    let cell = (x.checked_add(dx), y.checked_add(dy), z.checked_add(dz));
                    let (Some(cx), Some(cy), Some(cz)) = cell else {
                        n.opaque[i] = self.edge_is_occupied();
                        if self.config.sky_shade_depth > 0 && n.opaque[i] {
                            n.shade[i] = 1.0;
                        }
                        continue;
                    };
                    n.opaque[i] = self.opaque_at(voxels, cx, cy, cz);
                    n.light[i] = lights.light(cx, cy, cz);
                    if self.config.sky_shade_depth > 0 {
                        n.shade[i] = self.sky_shade(voxels, cx, cy, cz);
                    }
                }
            }
        }
        n
    }

    /// Resolves the block stored at `(x, y, z)`.
    pub fn resolve<V, L>(&self, voxels: &V, lights: &L, x: i32, y: i32, z: i32) -> BlockFaces
    where
        V: VoxelSource + ?Sized,
        L: LightSource + ?Sized,
    {
        let value = voxels.voxel(x, y, z).unwrap_or(AIR);
        if value == AIR {
            return BlockFaces::default();
        }
        let n = self.gather(voxels, lights, x, y, z);
        self.resolve_with(value, y, &n)
    }

    /// Min-AO/max-light pair for the plant at `(x, y, z)`, or `None` when it is fully enclosed.
    pub fn resolve_plant<V, L>(
        &self,
        voxels: &V,
        lights: &L,
        x: i32,
        y: i32,
        z: i32,
    ) -> Option<(f32, f32)>
    where
        V: VoxelSource + ?Sized,
        L: LightSource + ?Sized,
    {
        let faces = self.resolve(voxels, lights, x, y, z);
        faces.any_visible().then(|| faces.plant_shading())
    }

    /// Resolves `value` against an already gathered neighborhood; `y` is only
    /// consulted for the world floor.
    pub fn resolve_with(&self, value: BlockValue, y: i32, n: &Neighborhood) -> BlockFaces {
        let cfg = self.config;
        let tiles = self.tiles.face_tiles(value);
        let plant = self.tiles.plant_tile(value);
        let emissive = cfg.max_light > 0 && n.light[CENTER] >= cfg.max_light;
        let mut out = BlockFaces {
            value,
            ..BlockFaces::default()
        };
        if value == AIR {
            return out;
        }
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            let on_floor = face == Face::NegY && cfg.world_floor == Some(y);
            let desc = &mut out.faces[face.index()];
            desc.visible = !n.opaque[cell_index(dx, dy, dz)] && !on_floor;
            desc.tile = plant.unwrap_or(tiles[face.index()]);
            for j in 0..4 {
                let cells = corner_cells(face, j);
                desc.ao[j] = self.corner_ao(n, &cells);
                desc.light[j] = if emissive {
                    1.0
                } else {
                    self.corner_light(n, &cells)
                };
            }
        }
        out
    }

    fn corner_ao(&self, n: &Neighborhood, cells: &[usize; 4]) -> f32 {
        let [corner, side1, side2, _] = cells.map(|i| n.opaque[i]);
        let level = if side1 && side2 {
            3
        } else {
            usize::from(corner) + usize::from(side1) + usize::from(side2)
        };
        let mut ao = self.config.ao_curve[level];
        if self.config.sky_shade_depth > 0 {
            ao += cells.iter().map(|&i| n.shade[i]).sum::<f32>() / 4.0;
        }
        ao.clamp(0.0, 1.0)
    }

    fn corner_light(&self, n: &Neighborhood, cells: &[usize; 4]) -> f32 {
        let max = self.config.max_light;
        if max == 0 {
            return 0.0;
        }
        let samples = cells.map(|i| f32::from(n.light[i]));
        let level = match self.config.light_aggregate {
            LightAggregate::Max => samples.into_iter().fold(0.0, f32::max),
            LightAggregate::Average => samples.iter().sum::<f32>() / 4.0,
        };
        (level / f32::from(max)).min(1.0)
    }
}
