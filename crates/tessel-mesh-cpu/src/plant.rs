use tessel_blocks::{AtlasLayout, Face, TileId};
use tessel_geom::{Mat4, Vec3};

use crate::buffer::{VertexBuffer, VertexFormat};
use crate::emit::Quad;
use crate::error::MeshError;

/// Faces of the billboard cross: both sides of the x = 0 and z = 0 planes.
const PLANT_FACES: [Face; 4] = [Face::NegX, Face::PosX, Face::NegZ, Face::PosZ];

/// Two crossed quads, each double sided, spun by `rotation` radians about +Y.
/// A single AO/light pair shades every corner. Returns 24.
pub fn make_plant(
    buf: &mut VertexBuffer,
    atlas: &AtlasLayout,
    ao: f32,
    light: f32,
    center: Vec3,
    n: f32,
    tile: TileId,
    rotation: f32,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Block)?;
    buf.reserve_faces(PLANT_FACES.len())?;
    let rect = atlas.tile_rect(tile);
    let spin = Mat4::rotation(Vec3::UP, rotation);
    let place = Mat4::translation(center.x, center.y, center.z) * spin;
    for face in PLANT_FACES {
        let mut quad = Quad::box_face(face, Vec3::ZERO, Vec3::splat(n), rect, true)
            .shaded([ao; 4], [light; 4]);
        for c in &mut quad.corners {
            *c = place.transform_point(*c);
        }
        quad.normal = spin.transform_point(quad.normal);
        quad.emit(buf);
    }
    Ok(PLANT_FACES.len() * 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_is_four_faces_around_center() {
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let c = Vec3::new(4.0, 7.0, -2.0);
        let n = make_plant(&mut buf, &AtlasLayout::default(), 0.25, 0.5, c, 0.5, 48, 0.7).unwrap();
        assert_eq!(n, 24);
        for v in buf.vertices() {
            assert_eq!((v[3], v[4]), (0.25, 0.5));
            let d = Vec3::new(v[0], v[1], v[2]) - c;
            // every corner sits n away from the vertical axis
            let r = (d.x * d.x + d.z * d.z).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
            assert!((d.y.abs() - 0.5).abs() < 1e-6);
            let normal = Vec3::new(v[7], v[8], v[9]);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(normal.y.abs() < 1e-6);
        }
    }

    #[test]
    fn plant_uvs_cover_whole_tile() {
        let atlas = AtlasLayout::default();
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        make_plant(&mut buf, &atlas, 0.0, 1.0, Vec3::ZERO, 0.5, 49, 0.0).unwrap();
        let rect = atlas.tile_rect(49);
        let us: Vec<f32> = buf.vertices().map(|v| v[5]).collect();
        assert!(us.contains(&rect.u0) && us.contains(&rect.u1));
    }
}
