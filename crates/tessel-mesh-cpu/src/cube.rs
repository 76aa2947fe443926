use tessel_blocks::{AtlasLayout, BlockValue, Face, TileId, TileTable};
use tessel_geom::Vec3;
use tessel_lighting::BlockFaces;

use crate::buffer::{VERTICES_PER_FACE, VertexBuffer, VertexFormat};
use crate::emit::{Quad, face_uv};
use crate::error::MeshError;

/// Per-face inputs of the cube generators, in `Face::index()` order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeFaces {
    pub visible: [bool; 6],
    pub tiles: [TileId; 6],
    pub ao: [[f32; 4]; 6],
    pub light: [[f32; 4]; 6],
}

impl CubeFaces {
    /// All faces visible with the same AO and light on every corner.
    pub fn uniform(tiles: [TileId; 6], ao: f32, light: f32) -> Self {
        Self {
            visible: [true; 6],
            tiles,
            ao: [[ao; 4]; 6],
            light: [[light; 4]; 6],
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: [false; 6],
            ..Self::uniform([0; 6], 0.0, 0.0)
        }
    }

    #[inline]
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

impl From<&BlockFaces> for CubeFaces {
    fn from(faces: &BlockFaces) -> Self {
        Self {
            visible: faces.visibility(),
            tiles: faces.tiles(),
            ao: faces.ao(),
            light: faces.light(),
        }
    }
}

/// Emits every visible face of a box with half extents `half` around `center`.
/// Returns the number of vertices written (6 per visible face).
pub fn make_cube_faces(
    buf: &mut VertexBuffer,
    atlas: &AtlasLayout,
    faces: &CubeFaces,
    center: Vec3,
    half: Vec3,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Block)?;
    let count = faces.visible_count();
    buf.reserve_faces(count)?;
    for face in Face::ALL {
        let i = face.index();
        if !faces.visible[i] {
            continue;
        }
        let rect = atlas.tile_rect_inset(faces.tiles[i]);
        Quad::box_face(face, center, half, rect, false)
            .shaded(faces.ao[i], faces.light[i])
            .emit(buf);
    }
    Ok(count * VERTICES_PER_FACE)
}

/// Unit-proportioned block of `value` with half size `n`; tiles come from the table,
/// so the four sides share one tile and top/bottom may differ.
pub fn make_cube(
    buf: &mut VertexBuffer,
    atlas: &AtlasLayout,
    tiles: &TileTable,
    value: BlockValue,
    faces: &CubeFaces,
    center: Vec3,
    n: f32,
) -> Result<usize, MeshError> {
    let faces = CubeFaces {
        tiles: tiles.face_tiles(value),
        ..*faces
    };
    make_cube_faces(buf, atlas, &faces, center, Vec3::splat(n))
}

/// The 12 edges of a cube as 24 `Line` vertices.
pub fn make_cube_wireframe(buf: &mut VertexBuffer, center: Vec3, n: f32) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Line)?;
    buf.reserve_vertices(24)?;
    // corner bits: x = 4, y = 2, z = 1
    let corner = |i: u32| {
        let s = |bit: u32| if i & bit != 0 { n } else { -n };
        (center + Vec3::new(s(4), s(2), s(1))).to_array()
    };
    let mut written = 0;
    for a in 0..8u32 {
        for b in a + 1..8 {
            if (a ^ b).count_ones() == 1 {
                buf.push_line(corner(a));
                buf.push_line(corner(b));
                written += 2;
            }
        }
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(buf: &VertexBuffer, i: usize) -> &[f32] {
        buf.vertex(i).unwrap()
    }

    #[test]
    fn hidden_cube_writes_nothing() {
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let mut faces = CubeFaces::hidden();
        faces.ao = [[0.75; 4]; 6];
        let n = make_cube_faces(&mut buf, &AtlasLayout::default(), &faces, Vec3::ZERO, Vec3::splat(0.5)).unwrap();
        assert_eq!(n, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn full_cube_is_36_vertices_with_uniform_shading() {
        let atlas = AtlasLayout::default();
        let tiles = [16, 16, 32, 0, 16, 16];
        let faces = CubeFaces::uniform(tiles, 0.0, 1.0);
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let n = make_cube_faces(&mut buf, &atlas, &faces, Vec3::new(1.0, 2.0, 3.0), Vec3::splat(0.5)).unwrap();
        assert_eq!(n, 36);
        assert_eq!(buf.vertex_count(), 36);
        for (f, face) in Face::ALL.iter().enumerate() {
            let rect = atlas.tile_rect(tiles[f]);
            for k in 0..6 {
                let v = block(&buf, f * 6 + k);
                assert_eq!(v[3], 0.0);
                assert_eq!(v[4], 1.0);
                assert!(v[5] > rect.u0 && v[5] < rect.u1, "{face:?}");
                assert!(v[6] > rect.v0 && v[6] < rect.v1, "{face:?}");
                assert_eq!(&v[7..10], &face.normal());
            }
        }
    }

    #[test]
    fn triangles_face_outward() {
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let mut faces = CubeFaces::uniform([1; 6], 0.0, 0.5);
        faces.ao[2] = [0.75, 0.0, 0.0, 0.75];
        make_cube_faces(&mut buf, &AtlasLayout::default(), &faces, Vec3::ZERO, Vec3::splat(0.5)).unwrap();
        let verts: Vec<&[f32]> = buf.vertices().collect();
        for tri in verts.chunks(3) {
            let p = |v: &[f32]| Vec3::new(v[0], v[1], v[2]);
            let (a, b, c) = (p(tri[0]), p(tri[1]), p(tri[2]));
            let n = Vec3::new(tri[0][7], tri[0][8], tri[0][9]);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
            // every vertex lies on the face plane
            assert!((a.dot(n) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn make_cube_takes_tiles_from_table() {
        let table = TileTable::from_toml_str(
            "[[blocks]]\nid = 1\nside = 16\ntop = 32\nbottom = 0\n",
        )
        .unwrap();
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let faces = CubeFaces::uniform([99; 6], 0.0, 0.0);
        make_cube(&mut buf, &AtlasLayout::default(), &table, 1, &faces, Vec3::ZERO, 0.5).unwrap();
        let atlas = AtlasLayout::default();
        let top = atlas.tile_rect(32);
        let v = block(&buf, Face::PosY.index() * 6);
        assert!(v[5] > top.u0 && v[5] < top.u1 && v[6] > top.v0 && v[6] < top.v1);
    }

    #[test]
    fn wireframe_is_twelve_unit_edges() {
        let mut buf = VertexBuffer::new(VertexFormat::Line);
        let n = make_cube_wireframe(&mut buf, Vec3::new(0.0, 10.0, 0.0), 0.5).unwrap();
        assert_eq!(n, 24);
        let verts: Vec<&[f32]> = buf.vertices().collect();
        for edge in verts.chunks(2) {
            let d: f32 = (0..3).map(|k| (edge[0][k] - edge[1][k]).abs()).sum();
            assert!((d - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn wrong_buffer_format_is_rejected() {
        let mut buf = VertexBuffer::new(VertexFormat::Sky);
        assert!(matches!(
            make_cube_wireframe(&mut buf, Vec3::ZERO, 0.5),
            Err(MeshError::FormatMismatch { .. })
        ));
    }
}
