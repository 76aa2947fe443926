use crate::error::MeshError;

/// Vertices emitted per rendered face: two triangles, no index buffer.
pub const VERTICES_PER_FACE: usize = 6;

/// Interleaved attribute layouts understood by the renderer.
///
/// | format    | stride | attributes                               |
/// |-----------|--------|------------------------------------------|
/// | `Block`   | 10     | position 3, ao 1, light 1, uv 2, normal 3 |
/// | `Line`    | 3      | position 3                               |
/// | `Sky`     | 8      | position 3, normal 3, uv 2               |
/// | `Glyph2d` | 4      | position 2, uv 2                         |
/// | `Glyph3d` | 5      | position 3, uv 2                         |
///
/// Triangles wind counter-clockwise seen from the side their normal points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Block,
    Line,
    Sky,
    Glyph2d,
    Glyph3d,
}

impl VertexFormat {
    /// Floats per vertex.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            VertexFormat::Block => 10,
            VertexFormat::Line => 3,
            VertexFormat::Sky => 8,
            VertexFormat::Glyph2d => 4,
            VertexFormat::Glyph3d => 5,
        }
    }

    /// Float offset of the normal within a vertex, if the format carries one.
    #[inline]
    pub const fn normal_offset(self) -> Option<usize> {
        match self {
            VertexFormat::Block => Some(7),
            VertexFormat::Sky => Some(3),
            _ => None,
        }
    }
}

fn face_floats(components: usize, faces: usize) -> Result<usize, MeshError> {
    faces
        .checked_mul(VERTICES_PER_FACE)
        .and_then(|v| v.checked_mul(components))
        .ok_or(MeshError::OutOfMemory)
}

/// Zeroed storage for `faces` faces of `components` floats per vertex.
pub fn malloc_faces(components: usize, faces: usize) -> Result<Vec<f32>, MeshError> {
    let len = face_floats(components, faces)?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| MeshError::OutOfMemory)?;
    data.resize(len, 0.0);
    Ok(data)
}

/// Append-only vertex storage with a fixed layout.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexBuffer {
    format: VertexFormat,
    data: Vec<f32>,
}

impl VertexBuffer {
    pub fn new(format: VertexFormat) -> Self {
        Self {
            format,
            data: Vec::new(),
        }
    }

    /// Empty buffer with room for exactly `faces` faces.
    pub fn with_faces(format: VertexFormat, faces: usize) -> Result<Self, MeshError> {
        let mut buf = Self::new(format);
        buf.reserve_faces(faces)?;
        Ok(buf)
    }

    pub fn reserve_faces(&mut self, faces: usize) -> Result<(), MeshError> {
        let extra = face_floats(self.format.stride(), faces)?;
        self.data
            .try_reserve_exact(extra)
            .map_err(|_| MeshError::OutOfMemory)
    }

    pub fn reserve_vertices(&mut self, vertices: usize) -> Result<(), MeshError> {
        let extra = vertices
            .checked_mul(self.format.stride())
            .ok_or(MeshError::OutOfMemory)?;
        self.data
            .try_reserve_exact(extra)
            .map_err(|_| MeshError::OutOfMemory)
    }

    #[inline]
    pub fn format(&self) -> VertexFormat {
        self.format
    }

    pub(crate) fn expect_format(&self, expected: VertexFormat) -> Result<(), MeshError> {
        if self.format == expected {
            Ok(())
        } else {
            Err(MeshError::FormatMismatch {
                expected,
                found: self.format,
            })
        }
    }

    /// Appends one vertex; `attrs` must be exactly one stride long.
    pub fn push_vertex(&mut self, attrs: &[f32]) -> Result<(), MeshError> {
        if attrs.len() != self.format.stride() {
            return Err(MeshError::StrideMismatch {
                expected: self.format.stride(),
                found: attrs.len(),
            });
        }
        self.data.extend_from_slice(attrs);
        Ok(())
    }

    #[inline]
    pub(crate) fn push_block(&mut self, pos: [f32; 3], ao: f32, light: f32, uv: (f32, f32), normal: [f32; 3]) {
        debug_assert_eq!(self.format, VertexFormat::Block);
        self.data.extend_from_slice(&[
            pos[0], pos[1], pos[2], ao, light, uv.0, uv.1, normal[0], normal[1], normal[2],
        ]);
    }

    #[inline]
    pub(crate) fn push_line(&mut self, pos: [f32; 3]) {
        debug_assert_eq!(self.format, VertexFormat::Line);
        self.data.extend_from_slice(&pos);
    }

    #[inline]
    pub(crate) fn push_sky(&mut self, pos: [f32; 3], normal: [f32; 3], uv: (f32, f32)) {
        debug_assert_eq!(self.format, VertexFormat::Sky);
        self.data.extend_from_slice(&[
            pos[0], pos[1], pos[2], normal[0], normal[1], normal[2], uv.0, uv.1,
        ]);
    }

    #[inline]
    pub(crate) fn push_glyph2d(&mut self, pos: (f32, f32), uv: (f32, f32)) {
        debug_assert_eq!(self.format, VertexFormat::Glyph2d);
        self.data.extend_from_slice(&[pos.0, pos.1, uv.0, uv.1]);
    }

    #[inline]
    pub(crate) fn push_glyph3d(&mut self, pos: [f32; 3], uv: (f32, f32)) {
        debug_assert_eq!(self.format, VertexFormat::Glyph3d);
        self.data.extend_from_slice(&[pos[0], pos[1], pos[2], uv.0, uv.1]);
    }

    #[inline]
    pub fn len_floats(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.format.stride()
    }

    /// Whole faces written so far.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.vertex_count() / VERTICES_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Attributes of vertex `i`.
    pub fn vertex(&self, i: usize) -> Option<&[f32]> {
        let s = self.format.stride();
        let start = i.checked_mul(s)?;
        self.data.get(start..start.checked_add(s)?)
    }

    pub fn vertices(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.format.stride())
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Little-endian bytes, ready for upload.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    /// Drops the contents and keeps the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}
