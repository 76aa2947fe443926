use serde::Deserialize;

/// How the four face-plane light samples of a corner combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightAggregate {
    Max,
    #[default]
    Average,
}

/// What a cell outside the loaded region counts as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Opaque: faces against it stay hidden and corners darken.
    #[default]
    Occupied,
    Empty,
}

/// `[resolver]` section.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Occlusion for 0..=3 opaque corner neighbours.
    pub ao_curve: [f32; 4],
    pub light_aggregate: LightAggregate,
    /// Light level that maps to 1.0; a block lit at this level is emissive.
    pub max_light: u8,
    pub boundary: BoundaryPolicy,
    /// Column height scanned for sky shading; 0 disables it.
    pub sky_shade_depth: u8,
    /// Bottom faces of blocks at this height are never emitted.
    pub world_floor: Option<i32>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ao_curve: [0.0, 0.25, 0.5, 0.75],
            light_aggregate: LightAggregate::Average,
            max_light: 15,
            boundary: BoundaryPolicy::Occupied,
            sky_shade_depth: 8,
            world_floor: None,
        }
    }
}

impl ResolverConfig {
    /// Plain corner occlusion: no sky shading, no floor.
    pub fn flat() -> Self {
        Self {
            sky_shade_depth: 0,
            ..Self::default()
        }
    }
}
