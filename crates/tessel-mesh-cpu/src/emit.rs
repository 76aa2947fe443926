use tessel_blocks::{Face, UvRect};
use tessel_geom::Vec3;

use crate::buffer::VertexBuffer;

/// Face-local texture coordinate of a corner offset: u runs to the viewer's
/// right and v up (towards -z on the top face, +z on the bottom face).
#[inline]
pub(crate) fn face_uv(face: Face, c: [i32; 3]) -> (f32, f32) {
    let h = |s: i32| if s > 0 { 1.0 } else { 0.0 };
    match face {
        Face::NegX => (h(c[2]), h(c[1])),
        Face::PosX => (h(-c[2]), h(c[1])),
        Face::PosY => (h(c[0]), h(-c[2])),
        Face::NegY => (h(c[0]), h(c[2])),
        Face::NegZ => (h(-c[0]), h(c[1])),
        Face::PosZ => (h(c[0]), h(c[1])),
    }
}

/// Triangle corner indices for a quad. Splits along 1–2 when that keeps the
/// darker pair of corners apart.
#[inline]
pub(crate) fn quad_triangles(ao: &[f32; 4]) -> [[usize; 3]; 2] {
    if ao[0] + ao[3] > ao[1] + ao[2] {
        [[0, 1, 2], [1, 3, 2]]
    } else {
        [[0, 3, 2], [0, 1, 3]]
    }
}

/// Orders a triangle counter-clockwise around `n`.
#[inline]
fn wind(p: &[Vec3; 4], n: Vec3, tri: [usize; 3]) -> [usize; 3] {
    let [a, b, c] = tri;
    let cross = (p[b] - p[a]).cross(p[c] - p[a]);
    if cross.dot(n) < 0.0 { [a, c, b] } else { tri }
}

/// One shaded, textured quad as two `Block` triangles.
pub(crate) struct Quad {
    pub corners: [Vec3; 4],
    pub normal: Vec3,
    pub ao: [f32; 4],
    pub light: [f32; 4],
    pub uv: [(f32, f32); 4],
}

impl Quad {
    /// Corners of `face` for a box of half extents `half` around `center`.
    /// `flat` collapses the face onto the centre plane (billboards).
    pub fn box_face(face: Face, center: Vec3, half: Vec3, rect: UvRect, flat: bool) -> Quad {
        let mut corners = [Vec3::ZERO; 4];
        let mut uv = [(0.0, 0.0); 4];
        for j in 0..4 {
            let mut c = tessel_blocks::corner_offset(face, j);
            if flat {
                c[face.axis()] = 0;
            }
            corners[j] = center + Vec3::from_i32(c[0], c[1], c[2]).scale(half);
            let (u, v) = face_uv(face, c);
            uv[j] = rect.lerp(u, v);
        }
        Quad {
            corners,
            normal: Vec3::from(face.normal()),
            ao: [0.0; 4],
            light: [0.0; 4],
            uv,
        }
    }

    pub fn shaded(mut self, ao: [f32; 4], light: [f32; 4]) -> Quad {
        self.ao = ao;
        self.light = light;
        self
    }

    /// Writes 6 vertices.
    pub fn emit(&self, buf: &mut VertexBuffer) {
        let n = self.normal.to_array();
        for tri in quad_triangles(&self.ao) {
            for i in wind(&self.corners, self.normal, tri) {
                buf.push_block(self.corners[i].to_array(), self.ao[i], self.light[i], self.uv[i], n);
            }
        }
    }
}
