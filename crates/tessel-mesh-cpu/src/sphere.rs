use std::f32::consts::PI;

use tessel_geom::Vec3;

use crate::buffer::{VertexBuffer, VertexFormat};
use crate::error::MeshError;

const OCTAHEDRON: [Vec3; 6] = [
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [4, 3, 0],
    [1, 4, 0],
    [3, 4, 5],
    [4, 1, 5],
    [0, 3, 2],
    [0, 2, 1],
    [5, 2, 3],
    [5, 1, 2],
];

/// Triangles produced at `detail`: `8 * 4^detail`.
pub fn sphere_triangles(detail: i32) -> Result<usize, MeshError> {
    let d = u32::try_from(detail).map_err(|_| MeshError::InvalidDetail(detail))?;
    4usize
        .checked_pow(d)
        .and_then(|t| t.checked_mul(OCTAHEDRON_FACES.len()))
        .ok_or(MeshError::OutOfMemory)
}

/// Unit octahedron subdivided `detail` times, scaled to `radius`, as `Sky` vertices.
/// Texture v follows latitude (`1 - acos(y)/π`), u is 0.
pub fn make_sphere(buf: &mut VertexBuffer, radius: f32, detail: i32) -> Result<usize, MeshError> {
    buf.expect_format(VertexFormat::Sky)?;
    let triangles = sphere_triangles(detail)?;
    let vertices = triangles.checked_mul(3).ok_or(MeshError::OutOfMemory)?;
    buf.reserve_vertices(vertices)?;
    for [a, b, c] in OCTAHEDRON_FACES {
        let (mut a, mut b, mut c) = (OCTAHEDRON[a], OCTAHEDRON[b], OCTAHEDRON[c]);
        if (b - a).cross(c - a).dot(a + b + c) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        subdivide(buf, radius, [a, b, c], detail);
    }
    Ok(vertices)
}

fn subdivide(buf: &mut VertexBuffer, radius: f32, [a, b, c]: [Vec3; 3], detail: i32) {
    if detail <= 0 {
        for p in [a, b, c] {
            let uv = (0.0, 1.0 - p.y.clamp(-1.0, 1.0).acos() / PI);
            buf.push_sky((p * radius).to_array(), p.to_array(), uv);
        }
        return;
    }
    let ab = a.midpoint(b).normalized();
    let bc = b.midpoint(c).normalized();
    let ca = c.midpoint(a).normalized();
    let d = detail - 1;
    subdivide(buf, radius, [a, ab, ca], d);
    subdivide(buf, radius, [b, bc, ab], d);
    subdivide(buf, radius, [c, ca, bc], d);
    subdivide(buf, radius, [ab, bc, ca], d);
}
