use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tessel_blocks::{AtlasLayout, TileTable};
use tessel_lighting::ResolverConfig;
use tessel_map::{ChunkKey, VoxelMap};
use tessel_mesh_cpu::{ChunkMesher, ChunkNeighborhood};

fn load_tiles() -> TileTable {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    TileTable::from_path(root.join("../../assets/tessel.toml")).unwrap()
}

/// Rolling hills of grass over dirt with a few plants, 32×32 columns.
fn hills(key: ChunkKey, size: i32) -> VoxelMap {
    let mut map = VoxelMap::for_chunk(key, size).unwrap();
    for x in key.x_range(size) {
        for z in key.z_range(size) {
            let h = 12 + ((x as f32 * 0.2).sin() * 4.0 + (z as f32 * 0.15).cos() * 3.0) as i32;
            for y in 0..h {
                map.set(x, y, z, if y + 1 == h { 1 } else { 7 }).unwrap();
            }
            if (x * 7 + z * 13) % 17 == 0 {
                map.set(x, h, z, 18).unwrap();
            }
        }
    }
    map
}

fn bench_chunk_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_mesh");
    let tiles = load_tiles();
    let cfg = ResolverConfig {
        world_floor: Some(0),
        ..ResolverConfig::default()
    };
    let size = 32;
    let center = ChunkKey::new(0, 0);
    let maps: Vec<((i32, i32), VoxelMap)> = (-1..=1)
        .flat_map(|dp| (-1..=1).map(move |dq| (dp, dq)))
        .map(|(dp, dq)| ((dp, dq), hills(center.offset(dp, dq), size)))
        .collect();
    let mut hood = ChunkNeighborhood::new(center, size);
    for ((dp, dq), map) in &maps {
        hood = hood.with_blocks(*dp, *dq, map);
    }
    let mesher = ChunkMesher::new(&tiles, &cfg, AtlasLayout::default(), 1337);
    group.bench_function("hills_32", |b| {
        b.iter(|| black_box(mesher.build(&hood).unwrap()))
    });
    let flat = ResolverConfig {
        sky_shade_depth: 0,
        ..cfg.clone()
    };
    let mesher = ChunkMesher::new(&tiles, &flat, AtlasLayout::default(), 1337);
    group.bench_function("hills_32_no_sky_shade", |b| {
        b.iter(|| black_box(mesher.build(&hood).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_chunk_mesh);
criterion_main!(benches);
