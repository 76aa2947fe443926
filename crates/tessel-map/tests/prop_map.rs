use std::collections::HashMap;

use proptest::prelude::*;
use tessel_map::{LOAD_FACTOR_DENOM, MapError, VoxelMap};

fn coord() -> impl Strategy<Value = (i32, i32, i32)> {
    (-40i32..40, -8i32..72, -40i32..40)
}

proptest! {
    #[test]
    fn last_write_wins(ops in prop::collection::vec((coord(), 0u16..64), 1..300)) {
        let mut map = VoxelMap::alloc((-1, 0, -1), 15).unwrap();
        let mut model = HashMap::new();
        for ((x, y, z), v) in &ops {
            map.set(*x, *y, *z, *v).unwrap();
            model.insert((*x, *y, *z), *v);
        }
        prop_assert_eq!(map.len(), model.len());
        prop_assert!(map.len() * LOAD_FACTOR_DENOM <= map.mask());
        for (&(x, y, z), &v) in &model {
            prop_assert!(map.contains(x, y, z));
            prop_assert_eq!(map.get(x, y, z), v);
        }
        let mut seen: Vec<_> = map.iter().collect();
        seen.sort();
        let mut want: Vec<_> = model.iter().map(|(&(x, y, z), &v)| (x, y, z, v)).collect();
        want.sort();
        prop_assert_eq!(seen, want);
    }

    #[test]
    fn grow_preserves_contents(ops in prop::collection::vec((coord(), 1u16..64), 1..40)) {
        let mut map = VoxelMap::alloc((0, 0, 0), 127).unwrap();
        for ((x, y, z), v) in &ops {
            map.set(*x, *y, *z, *v).unwrap();
        }
        let before: Vec<_> = {
            let mut v: Vec<_> = map.iter().collect();
            v.sort();
            v
        };
        map.grow().unwrap();
        prop_assert_eq!(map.capacity(), 256);
        let mut after: Vec<_> = map.iter().collect();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn copies_are_independent(
        ops in prop::collection::vec((coord(), 1u16..64), 1..60),
        dst_mask in prop::sample::select(vec![0usize, 15, 1023]),
    ) {
        let mut src = VoxelMap::alloc((5, 0, 5), 31).unwrap();
        for ((x, y, z), v) in &ops {
            src.set(*x, *y, *z, *v).unwrap();
        }
        let mut dst = VoxelMap::alloc((0, 0, 0), dst_mask).unwrap();
        dst.set(1000, 1000, 1000, 9).unwrap();
        dst.copy_from(&src).unwrap();
        prop_assert!(dst.capacity() >= src.capacity());
        prop_assert_eq!(dst.len(), src.len());
        prop_assert!(!dst.contains(1000, 1000, 1000));
        for (x, y, z, v) in src.iter() {
            prop_assert_eq!(dst.get(x, y, z), v);
        }

        let ((x, y, z), v) = ops[0];
        dst.set(x, y, z, v + 100).unwrap();
        prop_assert_ne!(src.get(x, y, z), v + 100);
    }
}

#[test]
fn sixteen_slot_map_survives_twenty_inserts() {
    let mut map = VoxelMap::alloc((0, 0, 0), 15).unwrap();
    for i in 0..20 {
        map.set(i, i * 2, -i, (i + 1) as u16).unwrap();
    }
    assert!(map.capacity() > 16);
    assert_eq!(map.len(), 20);
    for i in 0..20 {
        assert_eq!(map.get(i, i * 2, -i), (i + 1) as u16);
    }
    assert_eq!(map.get(99, 0, 0), 0);
}

#[test]
fn snapshot_is_a_deep_clone() {
    let mut map = VoxelMap::alloc((0, 0, 0), 7).unwrap();
    map.set(1, 1, 1, 3).unwrap();
    let snap = map.snapshot().unwrap();
    map.set(1, 1, 1, 4).unwrap();
    assert_eq!(snap.get(1, 1, 1), 3);
    assert_eq!(map.get(1, 1, 1), 4);
    map.free();
}

#[test]
fn capacity_errors_are_reported() {
    assert_eq!(
        VoxelMap::alloc((0, 0, 0), 100).unwrap_err(),
        MapError::InvalidCapacity(101)
    );
}
