use tessel_blocks::{AtlasLayout, TileTable};
use tessel_lighting::ResolverConfig;
use tessel_map::{ChunkKey, VoxelMap};
use tessel_mesh_cpu::{ChunkMesher, ChunkNeighborhood, VertexFormat};

fn tiles() -> TileTable {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    TileTable::from_path(root.join("../../assets/tessel.toml")).unwrap()
}

fn flat_chunk(key: ChunkKey, size: i32, height: i32) -> VoxelMap {
    let mut map = VoxelMap::for_chunk(key, size).unwrap();
    for x in key.x_range(size) {
        for z in key.z_range(size) {
            for y in 0..height {
                map.set(x, y, z, 3).unwrap();
            }
        }
    }
    map
}

#[test]
fn isolated_slab_shows_its_whole_surface() {
    let tiles = tiles();
    let cfg = ResolverConfig {
        boundary: tessel_lighting::BoundaryPolicy::Empty,
        world_floor: None,
        ..ResolverConfig::flat()
    };
    let key = ChunkKey::new(0, 0);
    let map = flat_chunk(key, 4, 2);
    let hood = ChunkNeighborhood::new(key, 4).with_blocks(0, 0, &map);
    let mesher = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 7);
    let mesh = mesher.build(&hood).unwrap();
    // 4x4 top + 4x4 bottom + 4 sides of 4x2
    assert_eq!(mesh.faces, 16 + 16 + 4 * 8);
    assert_eq!(mesh.buffer.format(), VertexFormat::Block);
    assert_eq!(mesh.buffer.face_count(), mesh.faces);
    assert_eq!((mesh.miny, mesh.maxy), (0, 1));
}

#[test]
fn unloaded_neighbours_hide_chunk_edges() {
    let tiles = tiles();
    let cfg = ResolverConfig {
        world_floor: Some(0),
        ..ResolverConfig::default()
    };
    let key = ChunkKey::new(1, -1);
    let map = flat_chunk(key, 4, 1);
    let hood = ChunkNeighborhood::new(key, 4).with_blocks(0, 0, &map);
    let mesh = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 7)
        .build(&hood)
        .unwrap();
    // only the tops: edges face unloaded chunks, bottoms sit on the floor
    assert_eq!(mesh.faces, 16);
}

#[test]
fn loaded_neighbours_share_their_seam() {
    let tiles = tiles();
    let cfg = ResolverConfig {
        world_floor: Some(0),
        ..ResolverConfig::default()
    };
    let size = 4;
    let center = ChunkKey::new(0, 0);
    let maps: Vec<(i32, i32, VoxelMap)> = (-1..=1)
        .flat_map(|dp| (-1..=1).map(move |dq| (dp, dq)))
        .map(|(dp, dq)| (dp, dq, flat_chunk(center.offset(dp, dq), size, 1)))
        .collect();
    let mut hood = ChunkNeighborhood::new(center, size);
    for (dp, dq, m) in &maps {
        hood = hood.with_blocks(*dp, *dq, m);
    }
    let mesh = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 7)
        .build(&hood)
        .unwrap();
    assert_eq!(mesh.faces, 16);
}

#[test]
fn plants_become_crosses_with_stable_rotation() {
    let tiles = tiles();
    let cfg = ResolverConfig {
        world_floor: Some(0),
        ..ResolverConfig::default()
    };
    let key = ChunkKey::new(0, 0);
    let mut map = flat_chunk(key, 4, 1);
    // tall grass
    map.set(1, 1, 1, 17).unwrap();
    let hood = ChunkNeighborhood::new(key, 4).with_blocks(0, 0, &map);
    let mesher = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 99);
    let a = mesher.build(&hood).unwrap();
    let b = mesher.build(&hood).unwrap();
    assert_eq!(a.buffer, b.buffer);
    // the grass does not hide the top face below it
    assert_eq!(a.faces, 16 + 4);
    assert_eq!(a.maxy, 1);
    let r = mesher.plant_rotation(1, 1);
    assert!((0.0..=std::f32::consts::TAU).contains(&r));
}

#[test]
fn empty_chunk_meshes_to_nothing() {
    let tiles = tiles();
    let cfg = ResolverConfig::default();
    let key = ChunkKey::new(3, 3);
    let map = VoxelMap::for_chunk(key, 32).unwrap();
    let hood = ChunkNeighborhood::new(key, 32).with_blocks(0, 0, &map);
    let mesh = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 1)
        .build(&hood)
        .unwrap();
    assert_eq!(mesh.faces, 0);
    assert!(mesh.buffer.is_empty());
    let bounds = mesh.bounds(32);
    assert_eq!(bounds.min.x, 96.0);
}
