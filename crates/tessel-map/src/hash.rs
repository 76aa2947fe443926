/// Integer bit mixer applied to each coordinate before combining.
#[inline]
pub fn hash_int(key: i32) -> u32 {
    let mut k = key as u32;
    k = (!k).wrapping_add(k << 15);
    k ^= k >> 12;
    k = k.wrapping_add(k << 2);
    k ^= k >> 4;
    k = k.wrapping_mul(2057);
    k ^= k >> 16;
    k
}

/// Combined hash of an absolute block coordinate.
#[inline]
pub fn hash_coords(x: i32, y: i32, z: i32) -> u32 {
    hash_int(x) ^ hash_int(y) ^ hash_int(z)
}
