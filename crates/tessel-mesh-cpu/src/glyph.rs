use tessel_blocks::GlyphAtlas;
use tessel_geom::Vec3;

use crate::buffer::{VERTICES_PER_FACE, VertexBuffer, VertexFormat};
use crate::error::MeshError;

/// Which block face a world-space glyph is printed on, and for glyphs lying on
/// the top face, which way the text runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphFacing {
    NegX,
    PosX,
    NegZ,
    PosZ,
    /// On top, text running towards +x.
    TopPosX,
    TopNegZ,
    TopNegX,
    TopPosZ,
}

impl GlyphFacing {
    pub const ALL: [GlyphFacing; 8] = [
        GlyphFacing::NegX,
        GlyphFacing::PosX,
        GlyphFacing::NegZ,
        GlyphFacing::PosZ,
        GlyphFacing::TopPosX,
        GlyphFacing::TopNegZ,
        GlyphFacing::TopNegX,
        GlyphFacing::TopPosZ,
    ];

    /// Sign face numbering: 0..4 are the side faces, 4..8 the top face in quarter turns.
    #[inline]
    pub fn from_index(i: usize) -> Option<GlyphFacing> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn normal(self) -> Vec3 {
        match self {
            GlyphFacing::NegX => Vec3::new(-1.0, 0.0, 0.0),
            GlyphFacing::PosX => Vec3::new(1.0, 0.0, 0.0),
            GlyphFacing::NegZ => Vec3::new(0.0, 0.0, -1.0),
            GlyphFacing::PosZ => Vec3::new(0.0, 0.0, 1.0),
            _ => Vec3::UP,
        }
    }

    /// `(right, up)` in world space as seen by a reader facing the glyph.
    pub fn basis(self) -> (Vec3, Vec3) {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        match self {
            GlyphFacing::NegX => (z, Vec3::UP),
            GlyphFacing::PosX => (-z, Vec3::UP),
            GlyphFacing::NegZ => (-x, Vec3::UP),
            GlyphFacing::PosZ => (x, Vec3::UP),
            GlyphFacing::TopPosX => (x, -z),
            GlyphFacing::TopNegZ => (-z, -x),
            GlyphFacing::TopNegX => (-x, z),
            GlyphFacing::TopPosZ => (z, x),
        }
    }
}

/// Screen-space glyph `c` centred on `(x, y)` with half extents `(n, m)`. Returns 6.
pub fn make_character(
    buf: &mut VertexBuffer,
    glyphs: &GlyphAtlas,
    x: f32,
    y: f32,
    n: f32,
    m: f32,
    c: char,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Glyph2d)?;
    buf.reserve_faces(1)?;
    let r = glyphs.glyph_rect(c);
    let (bl, br, tr, tl) = (
        ((x - n, y - m), (r.u0, r.v0)),
        ((x + n, y - m), (r.u1, r.v0)),
        ((x + n, y + m), (r.u1, r.v1)),
        ((x - n, y + m), (r.u0, r.v1)),
    );
    for (p, uv) in [bl, br, tr, bl, tr, tl] {
        buf.push_glyph2d(p, uv);
    }
    Ok(VERTICES_PER_FACE)
}

/// A line of text starting with the glyph centred on `(x, y)`; each glyph is
/// `n` wide and `2n` tall. Returns the vertices written.
pub fn make_text(
    buf: &mut VertexBuffer,
    glyphs: &GlyphAtlas,
    x: f32,
    y: f32,
    n: f32,
    text: &str,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Glyph2d)?;
    buf.reserve_faces(text.chars().count())?;
    let mut written = 0;
    let mut x = x;
    for c in text.chars() {
        written += make_character(buf, glyphs, x, y, n / 2.0, n, c)?;
        x += n;
    }
    Ok(written)
}

/// World-space glyph on the `facing` side of the block centred at `(x, y, z)`,
/// `2n` wide and `4n` tall. The cell is inset so neighbouring glyphs never bleed in.
pub fn make_character_3d(
    buf: &mut VertexBuffer,
    glyphs: &GlyphAtlas,
    x: f32,
    y: f32,
    z: f32,
    n: f32,
    facing: GlyphFacing,
    c: char,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Glyph3d)?;
    buf.reserve_faces(1)?;
    let cell = glyphs.glyph_rect(c);
    let r = cell.shrink((cell.u1 - cell.u0) / 5.0, (cell.v1 - cell.v0) / 5.0);
    let (right, up) = facing.basis();
    let center = Vec3::new(x, y, z) + facing.normal() * 0.5;
    let corner = |su: f32, sv: f32| (center + right * (su * n) + up * (sv * 2.0 * n)).to_array();
    let (bl, br, tr, tl) = (
        (corner(-1.0, -1.0), (r.u0, r.v0)),
        (corner(1.0, -1.0), (r.u1, r.v0)),
        (corner(1.0, 1.0), (r.u1, r.v1)),
        (corner(-1.0, 1.0), (r.u0, r.v1)),
    );
    for (p, uv) in [bl, br, tr, bl, tr, tl] {
        buf.push_glyph3d(p, uv);
    }
    Ok(VERTICES_PER_FACE)
}
