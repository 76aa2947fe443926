/// One of the six axis-aligned faces of a unit cube.
///
/// The discriminants are the face index used by every per-face array in the
/// workspace: left, right, top, bottom, front, back.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    NegX = 0,
    PosX = 1,
    PosY = 2,
    NegY = 3,
    NegZ = 4,
    PosZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::NegX,
        Face::PosX,
        Face::PosY,
        Face::NegY,
        Face::NegZ,
        Face::PosZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index back into a `Face`; out-of-range indices yield `None`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    /// Integer grid step `(dx, dy, dz)` out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::NegX => (-1, 0, 0),
            Face::PosX => (1, 0, 0),
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::NegZ => (0, 0, -1),
            Face::PosZ => (0, 0, 1),
        }
    }

    #[inline]
    pub fn normal(self) -> [f32; 3] {
        let (x, y, z) = self.delta();
        [x as f32, y as f32, z as f32]
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::NegX => Face::PosX,
            Face::PosX => Face::NegX,
            Face::PosY => Face::NegY,
            Face::NegY => Face::PosY,
            Face::NegZ => Face::PosZ,
            Face::PosZ => Face::NegZ,
        }
    }

    /// Axis of the normal: 0 = x, 1 = y, 2 = z.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Face::NegX | Face::PosX => 0,
            Face::PosY | Face::NegY => 1,
            Face::NegZ | Face::PosZ => 2,
        }
    }

    /// The two tangent axes spanning the face, in corner-bit order.
    #[inline]
    pub fn tangents(self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }
}

/// Signs `(s1, s2)` of corner `j` along the face's two tangent axes.
/// Corner bit 1 selects the first tangent, bit 0 the second, so corners 0 and 3 are diagonal.
#[inline]
pub fn corner_signs(corner: usize) -> (i32, i32) {
    let s1 = if corner & 2 != 0 { 1 } else { -1 };
    let s2 = if corner & 1 != 0 { 1 } else { -1 };
    (s1, s2)
}

/// Offset of corner `j` of `face` from the cube centre, in half-size units (each component ±1).
pub fn corner_offset(face: Face, corner: usize) -> [i32; 3] {
    let (dx, dy, dz) = face.delta();
    let mut p = [dx, dy, dz];
    let (t1, t2) = face.tangents();
    let (s1, s2) = corner_signs(corner);
    p[t1] = s1;
    p[t2] = s2;
    p
}
