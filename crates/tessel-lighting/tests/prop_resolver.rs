use proptest::prelude::*;
use tessel_blocks::{Face, TileTable};
use tessel_lighting::{
    ConstantLight, NEIGHBORHOOD, Neighborhood, Resolver, ResolverConfig, cell_index, corner_cells,
};
use tessel_map::VoxelMap;

fn small_world() -> impl Strategy<Value = Vec<((i32, i32, i32), u16)>> {
    prop::collection::vec(((-2i32..3, -2i32..3, -2i32..3), 0u16..4), 0..60)
}

#[test]
fn corner_cells_lie_in_front_layer() {
    for face in Face::ALL {
        let (dx, dy, dz) = face.delta();
        let front = cell_index(dx, dy, dz);
        for j in 0..4 {
            let cells = corner_cells(face, j);
            assert_eq!(cells[3], front);
            assert!(cells.iter().all(|&c| c < NEIGHBORHOOD && c != cell_index(0, 0, 0)));
        }
    }
}

proptest! {
    #[test]
    fn exposure_follows_face_neighbour(world in small_world(), light in 0u8..=15) {
        let mut map = VoxelMap::alloc((0, 0, 0), 127).unwrap();
        for ((x, y, z), v) in &world {
            map.set(*x, *y, *z, *v).unwrap();
        }
        map.set(0, 0, 0, 1).unwrap();
        let tiles = TileTable::new();
        let cfg = ResolverConfig::default();
        let r = Resolver::new(&tiles, &cfg);
        let faces = r.resolve(&map, &ConstantLight(light), 0, 0, 0);
        for face in Face::ALL {
            let (dx, dy, dz) = face.delta();
            let desc = faces.face(face);
            prop_assert_eq!(desc.visible, map.get(dx, dy, dz) == 0);
            for j in 0..4 {
                prop_assert!((0.0..=1.0).contains(&desc.ao[j]));
                prop_assert!((0.0..=1.0).contains(&desc.light[j]));
            }
        }
    }

    #[test]
    fn more_occluders_never_brighten_a_corner(
        opaque in prop::array::uniform27(any::<bool>()),
        extra in 0usize..NEIGHBORHOOD,
    ) {
        let tiles = TileTable::new();
        let cfg = ResolverConfig::flat();
        let r = Resolver::new(&tiles, &cfg);
        let before = Neighborhood { opaque, ..Neighborhood::default() };
        let mut after = before.clone();
        after.opaque[extra] = true;
        let a = r.resolve_with(1, 0, &before);
        let b = r.resolve_with(1, 0, &after);
        for f in 0..6 {
            for j in 0..4 {
                prop_assert!(b.faces[f].ao[j] >= a.faces[f].ao[j]);
            }
        }
    }
}
