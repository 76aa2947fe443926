#![forbid(unsafe_code)]

mod config;
mod meshing;
mod worldgen;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tessel_geom::Vec3;
use tessel_map::ChunkKey;
use tessel_mesh_cpu::{ChunkMesher, MeshBuilder};

use crate::config::TesselConfig;
use crate::meshing::{MeshStats, mesh_region, showcase, visible_chunks};
use crate::worldgen::{Palette, Terrain, World, region};

#[derive(Parser, Debug)]
#[command(name = "tessel", about = "Generate a voxel world around the origin and mesh it on the CPU")]
struct Args {
    /// TOML config (blocks, atlas, resolver, world); defaults to assets/tessel.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chunks meshed in each direction from the origin chunk
    #[arg(short, long, default_value_t = 2)]
    radius: i32,

    /// Overrides world.seed
    #[arg(long)]
    seed: Option<i32>,

    /// Overrides world.chunk_size
    #[arg(long)]
    chunk_size: Option<i32>,

    /// Worker threads for generation and meshing (default: one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.radius < 0 {
        return Err(format!("--radius must not be negative, got {}", args.radius).into());
    }

    let mut cfg = TesselConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(size) = args.chunk_size {
        cfg.world.chunk_size = size;
    }
    cfg.validate()?;
    if let Some(jobs) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global()?;
    }
    log::info!(
        "world seed={} chunk_size={} radius={} threads={}",
        cfg.world.seed,
        cfg.world.chunk_size,
        args.radius,
        rayon::current_num_threads()
    );

    let tiles = cfg.tile_table()?;
    let size = cfg.world.chunk_size;
    let terrain = Terrain::new(cfg.world.clone(), Palette::from_tiles(&tiles));
    let center = ChunkKey::new(0, 0);
    // one extra ring so the outermost meshed chunks see real neighbours
    let world = World::generate(&terrain, &region(center, args.radius + 1))?;

    let mesher = ChunkMesher::new(&tiles, &cfg.resolver, cfg.atlas, cfg.world.seed);
    let meshes = mesh_region(&world, &mesher, &region(center, args.radius))?;
    let stats = MeshStats::of(&meshes);
    log::info!(
        "meshed chunks={} faces={} vertices={} bytes={}",
        stats.chunks,
        stats.faces,
        stats.vertices,
        stats.bytes
    );

    let eye = Vec3::new(0.5, terrain.height(0, 0) as f32 + 1.62, 0.5);
    let seen = visible_chunks(&meshes, size, eye, 65.0, 16.0 / 9.0);
    log::info!("visible from {:?}: {}/{} chunks", eye, seen, meshes.len());

    let builder = MeshBuilder::new(cfg.atlas, cfg.glyphs, &tiles, cfg.player);
    for (name, vertices) in showcase(&builder, &tiles)? {
        log::info!("primitive {} vertices={}", name, vertices);
    }
    Ok(())
}
