use tessel_blocks::{AtlasLayout, BlockValue, GlyphAtlas, PlayerSkin, TileId, TileTable};
use tessel_geom::Vec3;

use crate::buffer::{VERTICES_PER_FACE, VertexBuffer, VertexFormat};
use crate::cube::{CubeFaces, make_cube, make_cube_faces, make_cube_wireframe};
use crate::error::MeshError;
use crate::glyph::{GlyphFacing, make_character, make_character_3d, make_text};
use crate::player::{PLAYER_VERTICES, make_player};
use crate::plant::make_plant;
use crate::sphere::{make_sphere, sphere_triangles};

/// Every geometry the builder knows how to generate.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive<'a> {
    /// Block `value` with tiles looked up in the builder's table.
    Cube {
        value: BlockValue,
        faces: CubeFaces,
        center: Vec3,
        n: f32,
    },
    CubeFaces {
        faces: CubeFaces,
        center: Vec3,
        half: Vec3,
    },
    Wireframe {
        center: Vec3,
        n: f32,
    },
    Plant {
        ao: f32,
        light: f32,
        center: Vec3,
        n: f32,
        tile: TileId,
        rotation: f32,
    },
    Sphere {
        radius: f32,
        detail: i32,
    },
    Character {
        x: f32,
        y: f32,
        n: f32,
        m: f32,
        c: char,
    },
    Text {
        x: f32,
        y: f32,
        n: f32,
        text: &'a str,
    },
    Character3d {
        pos: Vec3,
        n: f32,
        facing: GlyphFacing,
        c: char,
    },
    Player {
        pos: Vec3,
        rx: f32,
        ry: f32,
    },
}

impl Primitive<'_> {
    pub fn format(&self) -> VertexFormat {
        match self {
            Primitive::Cube { .. }
            | Primitive::CubeFaces { .. }
            | Primitive::Plant { .. }
            | Primitive::Player { .. } => VertexFormat::Block,
            Primitive::Wireframe { .. } => VertexFormat::Line,
            Primitive::Sphere { .. } => VertexFormat::Sky,
            Primitive::Character { .. } | Primitive::Text { .. } => VertexFormat::Glyph2d,
            Primitive::Character3d { .. } => VertexFormat::Glyph3d,
        }
    }

    /// Six-vertex groups the primitive occupies.
    pub fn face_count(&self) -> Result<usize, MeshError> {
        Ok(match self {
            Primitive::Cube { faces, .. } | Primitive::CubeFaces { faces, .. } => faces.visible_count(),
            Primitive::Wireframe { .. } => 4,
            Primitive::Plant { .. } => 4,
            Primitive::Sphere { detail, .. } => sphere_triangles(*detail)? / 2,
            Primitive::Character { .. } | Primitive::Character3d { .. } => 1,
            Primitive::Text { text, .. } => text.chars().count(),
            Primitive::Player { .. } => PLAYER_VERTICES / VERTICES_PER_FACE,
        })
    }
}

/// Dispatches [`Primitive`]s to their generators with shared atlas and skin settings.
#[derive(Clone, Copy, Debug)]
pub struct MeshBuilder<'a> {
    pub atlas: AtlasLayout,
    pub glyphs: GlyphAtlas,
    pub tiles: &'a TileTable,
    pub skin: PlayerSkin,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(atlas: AtlasLayout, glyphs: GlyphAtlas, tiles: &'a TileTable, skin: PlayerSkin) -> Self {
        Self {
            atlas,
            glyphs,
            tiles,
            skin,
        }
    }

    /// Empty buffer of the right format with exactly enough room for `p`.
    pub fn alloc_for(&self, p: &Primitive<'_>) -> Result<VertexBuffer, MeshError> {
        VertexBuffer::with_faces(p.format(), p.face_count()?)
    }

    /// Appends `p` to `buf`; returns the vertices written.
    pub fn generate(&self, p: &Primitive<'_>, buf: &mut VertexBuffer) -> Result<usize, MeshError> {
        match *p {
            Primitive::Cube {
                value,
                ref faces,
                center,
                n,
            } => make_cube(buf, &self.atlas, self.tiles, value, faces, center, n),
            Primitive::CubeFaces {
                ref faces,
                center,
                half,
            } => make_cube_faces(buf, &self.atlas, faces, center, half),
            Primitive::Wireframe { center, n } => make_cube_wireframe(buf, center, n),
            Primitive::Plant {
                ao,
                light,
                center,
                n,
                tile,
                rotation,
            } => make_plant(buf, &self.atlas, ao, light, center, n, tile, rotation),
            Primitive::Sphere { radius, detail } => make_sphere(buf, radius, detail),
            Primitive::Character { x, y, n, m, c } => make_character(buf, &self.glyphs, x, y, n, m, c),
            Primitive::Text { x, y, n, text } => make_text(buf, &self.glyphs, x, y, n, text),
            Primitive::Character3d { pos, n, facing, c } => {
                make_character_3d(buf, &self.glyphs, pos.x, pos.y, pos.z, n, facing, c)
            }
            Primitive::Player { pos, rx, ry } => {
                make_player(buf, &self.atlas, &self.skin, pos.x, pos.y, pos.z, rx, ry)
            }
        }
    }

    /// [`alloc_for`](Self::alloc_for) followed by [`generate`](Self::generate).
    pub fn build(&self, p: &Primitive<'_>) -> Result<VertexBuffer, MeshError> {
        let mut buf = self.alloc_for(p)?;
        self.generate(p, &mut buf)?;
        Ok(buf)
    }
}
