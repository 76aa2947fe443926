use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    #[error("map capacity must be a non-zero power of two, got {0}")]
    InvalidCapacity(usize),

    #[error("out of memory allocating {slots} map slots")]
    OutOfMemory { slots: usize },
}
