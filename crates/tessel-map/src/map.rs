use tessel_blocks::BlockValue;

use crate::error::MapError;
use crate::hash::hash_coords;

/// Occupancy bound: the map grows before `len * LOAD_FACTOR_DENOM` would exceed `mask`,
/// so at most half of the slots are ever in use.
pub const LOAD_FACTOR_DENOM: usize = 2;

/// Stored key is relative to the map offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    x: i32,
    y: i32,
    z: i32,
    value: BlockValue,
}

/// Sparse map from block coordinates to block values.
///
/// Open addressing with linear probing over a power-of-two table; `None` marks an
/// unused slot, so a stored `0` ("known air") is distinct from a coordinate that
/// was never set. Not internally synchronized: clone it (or use [`VoxelMap::copy_from`])
/// to hand a snapshot to another thread.
#[derive(Clone, Debug)]
pub struct VoxelMap {
    dx: i32,
    dy: i32,
    dz: i32,
    mask: usize,
    len: usize,
    slots: Vec<Option<Entry>>,
}

fn alloc_slots(count: usize) -> Result<Vec<Option<Entry>>, MapError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(count)
        .map_err(|_| MapError::OutOfMemory { slots: count })?;
    slots.resize(count, None);
    Ok(slots)
}

impl VoxelMap {
    /// Creates an empty map with `mask + 1` slots; keys are stored relative to `offset`.
    pub fn alloc(offset: (i32, i32, i32), mask: usize) -> Result<Self, MapError> {
        let capacity = mask
            .checked_add(1)
            .ok_or(MapError::InvalidCapacity(mask))?;
        if !capacity.is_power_of_two() {
            return Err(MapError::InvalidCapacity(capacity));
        }
        Ok(Self {
            dx: offset.0,
            dy: offset.1,
            dz: offset.2,
            mask,
            len: 0,
            slots: alloc_slots(capacity)?,
        })
    }

    #[inline]
    pub fn offset(&self) -> (i32, i32, i32) {
        (self.dx, self.dy, self.dz)
    }

    #[inline]
    pub fn mask(&self) -> usize {
        self.mask
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Number of stored entries, including explicit zeros.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn relative(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        (
            x.wrapping_sub(self.dx),
            y.wrapping_sub(self.dy),
            z.wrapping_sub(self.dz),
        )
    }

    /// Slot holding `(x, y, z)` or the empty slot where it would go.
    fn probe(&self, x: i32, y: i32, z: i32) -> (usize, bool) {
        let (rx, ry, rz) = self.relative(x, y, z);
        let mut index = hash_coords(x, y, z) as usize & self.mask;
        loop {
            match &self.slots[index] {
                None => return (index, false),
                Some(e) if e.x == rx && e.y == ry && e.z == rz => return (index, true),
                Some(_) => index = (index + 1) & self.mask,
            }
        }
    }

    /// Stored value, or `0` for a coordinate that was never set.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockValue {
        match self.probe(x, y, z) {
            (index, true) => self.slots[index].map_or(0, |e| e.value),
            _ => 0,
        }
    }

    /// True if the coordinate has an entry, even one holding `0`.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.probe(x, y, z).1
    }

    /// Inserts or overwrites. Returns whether the map changed.
    ///
    /// Writing `0` keeps (or creates) an explicit air entry; nothing is ever removed.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: BlockValue) -> Result<bool, MapError> {
        let (index, _) = self.probe(x, y, z);
        if let Some(entry) = self.slots[index].as_mut() {
            if entry.value == value {
                return Ok(false);
            }
            entry.value = value;
            return Ok(true);
        }
        let index = if (self.len + 1) * LOAD_FACTOR_DENOM > self.mask {
            while (self.len + 1) * LOAD_FACTOR_DENOM > self.mask {
                self.grow()?;
            }
            self.probe(x, y, z).0
        } else {
            index
        };
        let (rx, ry, rz) = self.relative(x, y, z);
        self.slots[index] = Some(Entry {
            x: rx,
            y: ry,
            z: rz,
            value,
        });
        self.len += 1;
        Ok(true)
    }

    /// Doubles the slot count and rehashes every entry.
    pub fn grow(&mut self) -> Result<(), MapError> {
        let capacity = self
            .capacity()
            .checked_mul(2)
            .ok_or(MapError::OutOfMemory { slots: usize::MAX })?;
        let old = std::mem::replace(&mut self.slots, alloc_slots(capacity)?);
        self.mask = capacity - 1;
        for entry in old.into_iter().flatten() {
            let (x, y, z) = self.absolute(&entry);
            let (index, _) = self.probe(x, y, z);
            self.slots[index] = Some(entry);
        }
        log::debug!(
            "voxel map grew to {} slots ({} entries)",
            capacity,
            self.len
        );
        Ok(())
    }

    #[inline]
    fn absolute(&self, e: &Entry) -> (i32, i32, i32) {
        (
            e.x.wrapping_add(self.dx),
            e.y.wrapping_add(self.dy),
            e.z.wrapping_add(self.dz),
        )
    }

    /// Makes `self` an independent copy of `src`, keeping the larger of the two tables.
    pub fn copy_from(&mut self, src: &VoxelMap) -> Result<(), MapError> {
        if self.mask < src.mask {
            let mut slots = alloc_slots(src.capacity())?;
            slots.clone_from_slice(&src.slots);
            self.slots = slots;
        } else if self.mask == src.mask {
            self.slots.clone_from_slice(&src.slots);
        } else {
            self.slots.iter_mut().for_each(|s| *s = None);
            self.dx = src.dx;
            self.dy = src.dy;
            self.dz = src.dz;
            self.len = 0;
            for (x, y, z, value) in src.iter() {
                let (index, _) = self.probe(x, y, z);
                let (rx, ry, rz) = self.relative(x, y, z);
                self.slots[index] = Some(Entry {
                    x: rx,
                    y: ry,
                    z: rz,
                    value,
                });
                self.len += 1;
            }
            return Ok(());
        }
        self.dx = src.dx;
        self.dy = src.dy;
        self.dz = src.dz;
        self.mask = src.mask;
        self.len = src.len;
        Ok(())
    }

    /// Fallible deep clone, for snapshots handed to another owner.
    pub fn snapshot(&self) -> Result<VoxelMap, MapError> {
        let mut slots = alloc_slots(self.capacity())?;
        slots.clone_from_slice(&self.slots);
        Ok(VoxelMap {
            slots,
            ..*self
        })
    }

    /// Releases the table. Same as dropping the map.
    pub fn free(self) {}

    /// Entries as absolute `(x, y, z, value)`, in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            map: self,
            slots: self.slots.iter(),
        }
    }
}

pub struct Iter<'a> {
    map: &'a VoxelMap,
    slots: std::slice::Iter<'a, Option<Entry>>,
}

impl Iterator for Iter<'_> {
    type Item = (i32, i32, i32, BlockValue);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(e) = slot {
                let (x, y, z) = self.map.absolute(e);
                return Some((x, y, z, e.value));
            }
        }
        None
    }
}

impl<'a> IntoIterator for &'a VoxelMap {
    type Item = (i32, i32, i32, BlockValue);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
