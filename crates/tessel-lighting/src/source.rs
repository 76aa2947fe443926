use tessel_blocks::BlockValue;
use tessel_map::VoxelMap;

/// Read access to block values. `None` means the cell is outside the loaded region.
pub trait VoxelSource {
    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockValue>;
}

/// Read access to an already propagated light field.
pub trait LightSource {
    fn light(&self, x: i32, y: i32, z: i32) -> u8;
}

impl VoxelSource for VoxelMap {
    #[inline]
    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockValue> {
        Some(self.get(x, y, z))
    }
}

impl LightSource for VoxelMap {
    #[inline]
    fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        u8::try_from(self.get(x, y, z)).unwrap_or(u8::MAX)
    }
}

impl<T: VoxelSource + ?Sized> VoxelSource for &T {
    #[inline]
    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockValue> {
        (**self).voxel(x, y, z)
    }
}

impl<T: LightSource + ?Sized> LightSource for &T {
    #[inline]
    fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        (**self).light(x, y, z)
    }
}

/// Same light level everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConstantLight(pub u8);

impl LightSource for ConstantLight {
    #[inline]
    fn light(&self, _x: i32, _y: i32, _z: i32) -> u8 {
        self.0
    }
}

/// Restricts a source to the inclusive box `min..=max`; cells outside read as unloaded.
#[derive(Clone, Copy, Debug)]
pub struct Bounded<S> {
    pub inner: S,
    pub min: [i32; 3],
    pub max: [i32; 3],
}

impl<S> Bounded<S> {
    pub fn new(inner: S, min: [i32; 3], max: [i32; 3]) -> Self {
        Self { inner, min, max }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        let p = [x, y, z];
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

impl<S: VoxelSource> VoxelSource for Bounded<S> {
    #[inline]
    fn voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockValue> {
        if self.contains(x, y, z) {
            self.inner.voxel(x, y, z)
        } else {
            None
        }
    }
}

impl<S: LightSource> LightSource for Bounded<S> {
    #[inline]
    fn light(&self, x: i32, y: i32, z: i32) -> u8 {
        if self.contains(x, y, z) {
            self.inner.light(x, y, z)
        } else {
            0
        }
    }
}
