//! 4×4 matrices for post-transforming generated geometry and building cameras.
//!
//! Storage is column-major in the OpenGL convention: element `(row, col)` lives at
//! `m[col * 4 + row]`, so the translation occupies `m[12..15]`. Vectors are
//! columns and `a * b` applies `b` first.

use core::ops::Mul;

use crate::{Aabb, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4(pub [f32; 16]);

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.0[col * 4 + row]
    }

    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = dx;
        m.0[13] = dy;
        m.0[14] = dz;
        m
    }

    /// Right-handed rotation by `angle` radians about `axis` (normalized here).
    pub fn rotation(axis: Vec3, angle: f32) -> Self {
        let Vec3 { x, y, z } = axis.normalized();
        let (s, c) = angle.sin_cos();
        let m = 1.0 - c;
        Mat4([
            m * x * x + c,
            m * x * y + z * s,
            m * z * x - y * s,
            0.0,
            m * x * y - z * s,
            m * y * y + c,
            m * y * z + x * s,
            0.0,
            m * z * x + y * s,
            m * y * z - x * s,
            m * z * z + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, znear: f32, zfar: f32) -> Self {
        let twice_near = 2.0 * znear;
        let width = right - left;
        let height = top - bottom;
        let depth = zfar - znear;
        let mut m = [0.0; 16];
        m[0] = twice_near / width;
        m[5] = twice_near / height;
        m[8] = (right + left) / width;
        m[9] = (top + bottom) / height;
        m[10] = (-zfar - znear) / depth;
        m[11] = -1.0;
        m[14] = (-twice_near * zfar) / depth;
        Mat4(m)
    }

    /// Symmetric perspective projection; `fov` is the vertical field of view in degrees.
    pub fn perspective(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let ymax = znear * (fov.to_radians() / 2.0).tan();
        let xmax = ymax * aspect;
        Self::frustum(-xmax, xmax, -ymax, ymax, znear, zfar)
    }

    pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = [0.0; 16];
        m[0] = 2.0 / (right - left);
        m[5] = 2.0 / (top - bottom);
        m[10] = -2.0 / (far - near);
        m[12] = -(right + left) / (right - left);
        m[13] = -(top + bottom) / (top - bottom);
        m[14] = -(far + near) / (far - near);
        m[15] = 1.0;
        Mat4(m)
    }

    pub fn transform(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|col| self.at(row, col) * v[col]).sum();
        }
        out
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, _] = self.transform([p.x, p.y, p.z, 1.0]);
        Vec3::new(x, y, z)
    }

    /// Transforms `count` xyz triples in place, starting at `offset` and `stride` floats apart.
    ///
    /// Every triple is treated as a point (w = 1), which is also correct for
    /// normals as long as the matrix carries no translation.
    pub fn apply(&self, data: &mut [f32], count: usize, offset: usize, stride: usize) {
        for i in 0..count {
            let at = offset + stride * i;
            let v = &mut data[at..at + 3];
            let [x, y, z, _] = self.transform([v[0], v[1], v[2], 1.0]);
            v[0] = x;
            v[1] = y;
            v[2] = z;
        }
    }

    /// Clip planes `(a, b, c, d)` of a view-projection matrix, in the order
    /// left, right, bottom, top, near, far. Points inside satisfy `a*x+b*y+c*z+d >= 0`.
    pub fn frustum_planes(&self) -> Frustum {
        let row = |r: usize| [self.at(r, 0), self.at(r, 1), self.at(r, 2), self.at(r, 3)];
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        let plane = |a: [f32; 4], b: [f32; 4], sign: f32| {
            [a[0] + sign * b[0], a[1] + sign * b[1], a[2] + sign * b[2], a[3] + sign * b[3]]
        };
        Frustum {
            planes: [
                plane(r3, r0, 1.0),
                plane(r3, r0, -1.0),
                plane(r3, r1, 1.0),
                plane(r3, r1, -1.0),
                plane(r3, r2, 1.0),
                plane(r3, r2, -1.0),
            ],
        }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| self.at(row, k) * rhs.at(k, col)).sum();
            }
        }
        Mat4(out)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [[f32; 4]; 6],
}

impl Frustum {
    /// Conservative test: false only when all eight corners sit outside one plane.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let corners = aabb.corners();
        self.planes.iter().all(|p| {
            corners
                .iter()
                .any(|c| p[0] * c.x + p[1] * c.y + p[2] * c.z + p[3] >= 0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-5
    }

    #[test]
    fn rotation_about_y_turns_x_into_negative_z() {
        let m = Mat4::rotation(Vec3::UP, core::f32::consts::FRAC_PI_2);
        let p = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0) && approx(p.z, -1.0), "{p:?}");
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let t = Mat4::translation(5.0, 0.0, 0.0);
        let r = Mat4::rotation(Vec3::UP, core::f32::consts::PI);
        // rotate then translate
        let p = (t * r).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p.x, 4.0) && approx(p.z, 0.0), "{p:?}");
    }

    #[test]
    fn apply_honours_offset_and_stride() {
        let mut data = vec![0.0f32; 10];
        data[2..5].copy_from_slice(&[1.0, 2.0, 3.0]);
        data[7..10].copy_from_slice(&[4.0, 5.0, 6.0]);
        Mat4::translation(1.0, 1.0, 1.0).apply(&mut data, 2, 2, 5);
        assert_eq!(&data[2..5], &[2.0, 3.0, 4.0]);
        assert_eq!(&data[7..10], &[5.0, 6.0, 7.0]);
        assert_eq!(data[0], 0.0);
        assert_eq!(data[5], 0.0);
    }
}
