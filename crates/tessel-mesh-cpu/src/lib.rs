//! CPU mesh generation: cubes, plants, spheres, glyphs and players written into
//! flat interleaved vertex buffers, plus a whole-chunk mesher.
#![forbid(unsafe_code)]

mod buffer;
mod chunk;
mod cube;
mod emit;
mod error;
mod glyph;
mod plant;
mod player;
mod primitive;
mod sphere;

pub use buffer::{VERTICES_PER_FACE, VertexBuffer, VertexFormat, malloc_faces};
pub use chunk::{ChunkMesh, ChunkMesher, ChunkNeighborhood};
pub use cube::{CubeFaces, make_cube, make_cube_faces, make_cube_wireframe};
pub use error::MeshError;
pub use glyph::{GlyphFacing, make_character, make_character_3d, make_text};
pub use plant::make_plant;
pub use player::{PLAYER_LIGHT, PLAYER_VERTICES, make_player};
pub use primitive::{MeshBuilder, Primitive};
pub use sphere::{make_sphere, sphere_triangles};
