//! Face visibility, ambient occlusion and light sampling for single blocks.
#![forbid(unsafe_code)]

mod config;
mod resolve;
mod source;

pub use config::{BoundaryPolicy, LightAggregate, ResolverConfig};
pub use resolve::{
    BlockFaces, FaceDescriptor, NEIGHBORHOOD, Neighborhood, Resolver, cell_index, corner_cells,
};
pub use source::{Bounded, ConstantLight, LightSource, VoxelSource};
