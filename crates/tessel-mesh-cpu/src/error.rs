use tessel_map::MapError;
use thiserror::Error;

use crate::buffer::VertexFormat;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    #[error("sphere detail must be non-negative, got {0}")]
    InvalidDetail(i32),

    #[error("out of memory reserving vertex storage")]
    OutOfMemory,

    #[error("generator writes {expected:?} vertices into a {found:?} buffer")]
    FormatMismatch {
        expected: VertexFormat,
        found: VertexFormat,
    },

    #[error("vertex has {found} floats, layout stride is {expected}")]
    StrideMismatch { expected: usize, found: usize },

    #[error(transparent)]
    Map(#[from] MapError),
}
