use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::map::VoxelMap;

/// Initial slot mask for a per-chunk map (32768 slots).
pub const CHUNK_MAP_MASK: usize = 0x7fff;

/// Column of blocks `size` wide on x (`p`) and z (`q`), unbounded in y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkKey {
    pub p: i32,
    pub q: i32,
}

impl ChunkKey {
    #[inline]
    pub const fn new(p: i32, q: i32) -> Self {
        Self { p, q }
    }

    /// Chunk containing block column `(x, z)`.
    #[inline]
    pub fn of_block(x: i32, z: i32, size: i32) -> Self {
        Self {
            p: x.div_euclid(size),
            q: z.div_euclid(size),
        }
    }

    #[inline]
    pub fn offset(self, dp: i32, dq: i32) -> Self {
        Self {
            p: self.p + dp,
            q: self.q + dq,
        }
    }

    /// Block columns covered along x.
    #[inline]
    pub fn x_range(self, size: i32) -> std::ops::Range<i32> {
        self.p * size..(self.p + 1) * size
    }

    #[inline]
    pub fn z_range(self, size: i32) -> std::ops::Range<i32> {
        self.q * size..(self.q + 1) * size
    }
}

impl From<(i32, i32)> for ChunkKey {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkKey> for (i32, i32) {
    fn from(value: ChunkKey) -> Self {
        (value.p, value.q)
    }
}

/// Chunk index of a world-space coordinate: rounds to the nearest block first.
#[inline]
pub fn chunked(x: f32, size: i32) -> i32 {
    (x.round() / size as f32).floor() as i32
}

impl VoxelMap {
    /// Empty map for chunk `key`, offset one block below its minimum corner so
    /// border cells keep small relative keys.
    pub fn for_chunk(key: ChunkKey, size: i32) -> Result<Self, MapError> {
        VoxelMap::alloc((key.p * size - 1, 0, key.q * size - 1), CHUNK_MAP_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunked_rounds_then_floors() {
        assert_eq!(chunked(0.0, 32), 0);
        assert_eq!(chunked(31.4, 32), 0);
        assert_eq!(chunked(31.6, 32), 1);
        assert_eq!(chunked(-0.4, 32), 0);
        assert_eq!(chunked(-0.6, 32), -1);
        assert_eq!(chunked(-32.0, 32), -1);
        assert_eq!(chunked(-33.0, 32), -2);
    }

    #[test]
    fn block_keys_match_chunked() {
        for x in -70..70 {
            assert_eq!(ChunkKey::of_block(x, 0, 32).p, chunked(x as f32, 32));
        }
    }

    #[test]
    fn chunk_map_offset_and_capacity() {
        let map = VoxelMap::for_chunk(ChunkKey::new(2, -1), 32).unwrap();
        assert_eq!(map.offset(), (63, 0, -33));
        assert_eq!(map.capacity(), CHUNK_MAP_MASK + 1);
        assert!(map.is_empty());
    }

    #[test]
    fn offset_keys_convert_to_tuples() {
        let k = ChunkKey::new(0, 0);
        assert_eq!(<(i32, i32)>::from(k.offset(1, -1)), (1, -1));
        assert_eq!(k.x_range(32), 0..32);
        assert_eq!(k.offset(-1, 2).z_range(32), 64..96);
    }
}
