/// Stored per voxel. `0` is air; positive values are block type ids.
pub type BlockValue = u16;

/// Index of a tile in a fixed-grid texture atlas.
pub type TileId = u16;

pub const AIR: BlockValue = 0;
