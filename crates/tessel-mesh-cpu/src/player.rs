use tessel_blocks::{AtlasLayout, PlayerSkin, TileId};
use tessel_geom::{Mat4, Vec3};

use crate::buffer::{VertexBuffer, VertexFormat};
use crate::cube::{CubeFaces, make_cube_faces};
use crate::error::MeshError;

/// Flat light baked into every player vertex.
pub const PLAYER_LIGHT: f32 = 0.8;

/// Vertices in one player model: six boxes of 36.
pub const PLAYER_VERTICES: usize = 6 * 36;

struct Part {
    center: Vec3,
    half: Vec3,
    head: bool,
}

fn parts(skin: &PlayerSkin) -> [(Part, [TileId; 6]); 6] {
    let limb = Vec3::new(0.125, 0.375, 0.125);
    let part = |x: f32, y: f32, half: Vec3| Part {
        center: Vec3::new(x, y, 0.0),
        half,
        head: false,
    };
    [
        (
            Part {
                center: Vec3::ZERO,
                half: Vec3::splat(0.25),
                head: true,
            },
            skin.head,
        ),
        (part(0.0, -0.625, Vec3::new(0.25, 0.375, 0.125)), skin.body),
        (part(-0.375, -0.625, limb), skin.arm),
        (part(0.375, -0.625, limb), skin.arm),
        (part(-0.125, -1.375, limb), skin.leg),
        (part(0.125, -1.375, limb), skin.leg),
    ]
}

/// Player model with its head centred on `(x, y, z)`. The head pitches by `ry`
/// about its own centre, then the whole body yaws by `rx`. Returns 216.
pub fn make_player(
    buf: &mut VertexBuffer,
    atlas: &AtlasLayout,
    skin: &PlayerSkin,
    x: f32,
    y: f32,
    z: f32,
    rx: f32,
    ry: f32,
) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Block)?;
    buf.reserve_vertices(PLAYER_VERTICES)?;
    let stride = VertexFormat::Block.stride();
    let normal_at = VertexFormat::Block.normal_offset().unwrap_or(7);
    let yaw = Mat4::rotation(Vec3::UP, rx);
    let pitch = Mat4::rotation(Vec3::new(1.0, 0.0, 0.0), ry);
    let place = Mat4::translation(x, y, z);
    let mut written = 0;
    for (part, tiles) in parts(skin) {
        let start = buf.len_floats();
        let faces = CubeFaces::uniform(tiles, 0.0, PLAYER_LIGHT);
        let count = make_cube_faces(buf, atlas, &faces, part.center, part.half)?;
        let turn = if part.head { yaw * pitch } else { yaw };
        let data = &mut buf.as_mut_slice()[start..];
        (place * turn).apply(data, count, 0, stride);
        turn.apply(data, count, normal_at, stride);
        written += count;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(rx: f32, ry: f32) -> VertexBuffer {
        let mut buf = VertexBuffer::new(VertexFormat::Block);
        let n = make_player(&mut buf, &AtlasLayout::default(), &PlayerSkin::default(), 3.0, 5.0, 7.0, rx, ry)
            .unwrap();
        assert_eq!(n, PLAYER_VERTICES);
        buf
    }

    #[test]
    fn rest_pose_stands_below_the_head() {
        let buf = model(0.0, 0.0);
        let ys: Vec<f32> = buf.vertices().map(|v| v[1]).collect();
        let top = ys.iter().cloned().fold(f32::MIN, f32::max);
        let bottom = ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!((top - 5.25).abs() < 1e-5);
        assert!((bottom - 3.25).abs() < 1e-5);
        assert!(buf.vertices().all(|v| v[4] == PLAYER_LIGHT));
    }

    #[test]
    fn yaw_keeps_normals_unit_and_body_upright() {
        let buf = model(1.1, 0.4);
        for v in buf.vertices() {
            let n = Vec3::new(v[7], v[8], v[9]);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        // body boxes (after the 36 head vertices) only yaw, so their y extent is unchanged
        let body_min = buf.vertices().skip(36).map(|v| v[1]).fold(f32::MAX, f32::min);
        assert!((body_min - 3.25).abs() < 1e-5);
    }

    #[test]
    fn pitch_moves_only_the_head() {
        let still = model(0.0, 0.0);
        let nod = model(0.0, 0.6);
        let head_moved = (0..36).any(|i| still.vertex(i) != nod.vertex(i));
        assert!(head_moved);
        for i in 36..PLAYER_VERTICES {
            assert_eq!(still.vertex(i), nod.vertex(i));
        }
    }
}
