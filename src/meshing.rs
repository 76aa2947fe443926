use std::time::Instant;

use rayon::prelude::*;
use tessel_blocks::TileTable;
use tessel_geom::{Mat4, Vec3};
use tessel_map::ChunkKey;
use tessel_mesh_cpu::{ChunkMesh, ChunkMesher, CubeFaces, GlyphFacing, MeshBuilder, MeshError, Primitive};

use crate::worldgen::World;

#[inline]
fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis() as u32
}

/// Meshes every chunk in `keys` in parallel; each job works on its own snapshot.
pub fn mesh_region(world: &World, mesher: &ChunkMesher<'_>, keys: &[ChunkKey]) -> Result<Vec<ChunkMesh>, MeshError> {
    let start = Instant::now();
    let meshes = keys
        .par_iter()
        .filter(|&&key| world.get(key).is_some())
        .map(|&key| {
            let snap = world.snapshot(key)?;
            log::debug!("snapshot p={} q={} loaded={}", key.p, key.q, snap.loaded());
            mesher.build(&snap.neighborhood())
        })
        .collect::<Result<Vec<_>, _>>()?;
    let stats = MeshStats::of(&meshes);
    log::info!(
        target: "perf",
        "ms total={} mesh_region chunks={} faces={} bytes={}",
        elapsed_ms(start),
        stats.chunks,
        stats.faces,
        stats.bytes
    );
    Ok(meshes)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub chunks: usize,
    pub faces: usize,
    pub vertices: usize,
    pub bytes: usize,
}

impl MeshStats {
    pub fn of(meshes: &[ChunkMesh]) -> Self {
        meshes.iter().fold(Self::default(), |acc, m| Self {
            chunks: acc.chunks + 1,
            faces: acc.faces + m.faces,
            vertices: acc.vertices + m.buffer.vertex_count(),
            bytes: acc.bytes + m.buffer.len_floats() * std::mem::size_of::<f32>(),
        })
    }
}

/// Non-empty chunks inside the view frustum of a camera at `eye` looking down -z.
pub fn visible_chunks(meshes: &[ChunkMesh], size: i32, eye: Vec3, fov: f32, aspect: f32) -> usize {
    let proj = Mat4::perspective(fov, aspect, 0.125, 1024.0);
    let view = Mat4::translation(-eye.x, -eye.y, -eye.z);
    let planes = (proj * view).frustum_planes();
    meshes
        .iter()
        .filter(|m| m.faces > 0 && planes.intersects_aabb(&m.bounds(size)))
        .count()
}

/// One of every primitive the builder knows, built into its own buffer.
pub fn showcase(builder: &MeshBuilder<'_>, tiles: &TileTable) -> Result<Vec<(&'static str, usize)>, MeshError> {
    let grass = tiles.id_by_name("grass").unwrap_or(1);
    let plant = tiles
        .id_by_name("tall_grass")
        .and_then(|v| tiles.plant_tile(v))
        .unwrap_or(48);
    let faces = CubeFaces::uniform(tiles.face_tiles(grass), 0.0, 1.0);
    let prims = [
        ("cube", Primitive::Cube { value: grass, faces, center: Vec3::ZERO, n: 0.5 }),
        ("cube_faces", Primitive::CubeFaces { faces, center: Vec3::ZERO, half: Vec3::new(0.5, 0.25, 0.5) }),
        ("wireframe", Primitive::Wireframe { center: Vec3::ZERO, n: 0.53 }),
        ("plant", Primitive::Plant { ao: 0.0, light: 1.0, center: Vec3::ZERO, n: 0.5, tile: plant, rotation: 0.75 }),
        ("sky", Primitive::Sphere { radius: 1.0, detail: 3 }),
        ("crosshair", Primitive::Character { x: 0.0, y: 0.0, n: 8.0, m: 16.0, c: '+' }),
        ("text", Primitive::Text { x: 8.0, y: 8.0, n: 16.0, text: "tessel" }),
        ("sign", Primitive::Character3d { pos: Vec3::new(0.0, 1.0, 0.0), n: 0.0625, facing: GlyphFacing::PosZ, c: 'T' }),
        ("player", Primitive::Player { pos: Vec3::new(0.0, 2.0, 0.0), rx: 0.5, ry: -0.25 }),
    ];
    let mut out = Vec::with_capacity(prims.len());
    for (name, p) in &prims {
        let buf = builder.build(p)?;
        log::debug!("{} format={:?} vertices={}", name, buf.format(), buf.vertex_count());
        out.push((*name, buf.vertex_count()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::worldgen::{Palette, Terrain, region};
    use tessel_blocks::{AtlasLayout, GlyphAtlas, PlayerSkin};
    use tessel_lighting::ResolverConfig;

    fn tiles() -> TileTable {
        TileTable::from_toml_str(
            "[[blocks]]\nid = 1\nname = \"grass\"\nside = 16\ntop = 32\nbottom = 0\n\
             [[blocks]]\nid = 3\nname = \"stone\"\ntile = 2\n\
             [[blocks]]\nid = 7\nname = \"dirt\"\ntile = 6\n\
             [[blocks]]\nid = 17\nname = \"tall_grass\"\nplant = 48\n",
        )
        .unwrap()
    }

    #[test]
    fn region_meshes_match_serial_meshing() {
        let tiles = tiles();
        let params = WorldConfig {
            chunk_size: 8,
            ..WorldConfig::default()
        };
        let terrain = Terrain::new(params, Palette::from_tiles(&tiles));
        let center = ChunkKey::new(0, 0);
        let world = World::generate(&terrain, &region(center, 2)).unwrap();
        let config = ResolverConfig::default();
        let mesher = ChunkMesher::new(&tiles, &config, AtlasLayout::default(), 1337);

        let keys = region(center, 1);
        let meshes = mesh_region(&world, &mesher, &keys).unwrap();
        assert_eq!(meshes.len(), 9);
        for (key, mesh) in keys.iter().zip(&meshes) {
            assert_eq!(mesh.key, *key);
            assert!(mesh.faces > 0);
            let serial = mesher.build(&world.snapshot(*key).unwrap().neighborhood()).unwrap();
            assert_eq!(serial.faces, mesh.faces);
            assert_eq!(serial.buffer, mesh.buffer);
        }
        let stats = MeshStats::of(&meshes);
        assert_eq!(stats.vertices, stats.faces * 6);
        assert_eq!(stats.bytes, stats.vertices * 10 * 4);

        // eye inside the centre chunk looking down -z: the +q row is behind it
        let eye = Vec3::new(4.0, meshes[4].bounds(8).center().y, 4.0);
        let seen = visible_chunks(&meshes, 8, eye, 65.0, 1.0);
        assert!((1..=6).contains(&seen), "{seen}");
    }

    #[test]
    fn unloaded_keys_are_skipped() {
        let tiles = tiles();
        let terrain = Terrain::new(WorldConfig { chunk_size: 8, ..WorldConfig::default() }, Palette::from_tiles(&tiles));
        let world = World::generate(&terrain, &[ChunkKey::new(0, 0)]).unwrap();
        let config = ResolverConfig::default();
        let mesher = ChunkMesher::new(&tiles, &config, AtlasLayout::default(), 1);
        let meshes = mesh_region(&world, &mesher, &[ChunkKey::new(0, 0), ChunkKey::new(5, 5)]).unwrap();
        assert_eq!(meshes.len(), 1);
    }

    #[test]
    fn showcase_builds_every_primitive() {
        let tiles = tiles();
        let builder = MeshBuilder::new(AtlasLayout::default(), GlyphAtlas::default(), &tiles, PlayerSkin::default());
        let built = showcase(&builder, &tiles).unwrap();
        let counts: Vec<usize> = built.iter().map(|(_, n)| *n).collect();
        // sphere detail 3: 8 * 4^3 triangles
        assert_eq!(counts, vec![36, 36, 24, 24, 1536, 6, 36, 6, 216]);
    }
}
