//! Biome classification from elevation and moisture
//!
//! Ordered threshold rules map each cell's final elevation and moisture to one
//! of eight biomes; a static properties table supplies each biome's base color
//! and walkability.

use serde::{Deserialize, Serialize};

// =============================================================================
// ELEVATION BANDS
// =============================================================================

pub const WATER_LEVEL: f32 = 20.0;
pub const BEACH_LEVEL: f32 = 23.0;
pub const PLAINS_LEVEL: f32 = 35.0;
pub const HILLS_LEVEL: f32 = 50.0;
pub const MOUNTAIN_LEVEL: f32 = 70.0;

/// Deep water starts this far below the waterline.
pub const DEEP_WATER_OFFSET: f32 = 5.0;

// =============================================================================
// BIOMES
// =============================================================================

/// Biome types, ordered from deepest water to highest peaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    DeepWater,
    ShallowWater,
    Beach,
    Plains,
    Forest,
    Hills,
    Mountains,
    SnowCaps,
}

impl Biome {
    /// Classify a cell from its final elevation and moisture.
    ///
    /// The threshold tests are ordered: every real (elevation, moisture) pair
    /// lands in exactly one biome.
    pub fn classify(elevation: f32, moisture: f32) -> Biome {
        if elevation < WATER_LEVEL - DEEP_WATER_OFFSET {
            return Biome::DeepWater;
        }
        if elevation < WATER_LEVEL {
            return Biome::ShallowWater;
        }
        if elevation < BEACH_LEVEL {
            return Biome::Beach;
        }

        // Lowlands: moisture splits plains from forest
        if elevation < PLAINS_LEVEL {
            return if moisture < 0.6 {
                Biome::Plains
            } else {
                Biome::Forest
            };
        }

        // Highlands: drier slopes stay open hills, wetter ones stay forested
        if elevation < HILLS_LEVEL {
            return if moisture < 0.4 {
                Biome::Hills
            } else {
                Biome::Forest
            };
        }

        if elevation < MOUNTAIN_LEVEL {
            return Biome::Mountains;
        }

        Biome::SnowCaps
    }

    /// Static per-biome properties (pure configuration, seed-independent).
    pub fn properties(&self) -> BiomeProperties {
        match self {
            Biome::DeepWater => BiomeProperties {
                base_color: [0, 64, 220, 255],
                height_modifier: 0.3,
                roughness: 0.1,
                walkable: false,
            },
            Biome::ShallowWater => BiomeProperties {
                base_color: [0, 128, 255, 255],
                height_modifier: 0.5,
                roughness: 0.2,
                walkable: false,
            },
            Biome::Beach => BiomeProperties {
                base_color: [240, 220, 180, 255],
                height_modifier: 0.6,
                roughness: 0.2,
                walkable: true,
            },
            Biome::Plains => BiomeProperties {
                base_color: [100, 210, 100, 255],
                height_modifier: 1.0,
                roughness: 0.3,
                walkable: true,
            },
            Biome::Forest => BiomeProperties {
                base_color: [21, 120, 35, 255],
                height_modifier: 1.1,
                roughness: 0.4,
                walkable: true,
            },
            Biome::Hills => BiomeProperties {
                base_color: [90, 160, 90, 255],
                height_modifier: 1.2,
                roughness: 0.6,
                walkable: true,
            },
            Biome::Mountains => BiomeProperties {
                base_color: [150, 140, 130, 255],
                height_modifier: 1.5,
                roughness: 0.8,
                walkable: false,
            },
            Biome::SnowCaps => BiomeProperties {
                base_color: [255, 255, 255, 255],
                height_modifier: 1.6,
                roughness: 0.9,
                walkable: false,
            },
        }
    }

    /// Display name for stats output and previews.
    pub fn display_name(&self) -> &'static str {
        match self {
            Biome::DeepWater => "Deep Water",
            Biome::ShallowWater => "Shallow Water",
            Biome::Beach => "Beach",
            Biome::Plains => "Plains",
            Biome::Forest => "Forest",
            Biome::Hills => "Hills",
            Biome::Mountains => "Mountains",
            Biome::SnowCaps => "Snow Caps",
        }
    }

    pub fn all() -> &'static [Biome] {
        &[
            Biome::DeepWater,
            Biome::ShallowWater,
            Biome::Beach,
            Biome::Plains,
            Biome::Forest,
            Biome::Hills,
            Biome::Mountains,
            Biome::SnowCaps,
        ]
    }
}

/// Per-biome rendering and traversal properties.
///
/// `height_modifier` and `roughness` are reserved for terrain-roughness
/// effects and are not consumed by the current pipeline.
#[derive(Clone, Copy, Debug)]
pub struct BiomeProperties {
    pub base_color: [u8; 4],
    pub height_modifier: f32,
    pub roughness: f32,
    pub walkable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_total() {
        // Sweep a wide grid of inputs, including values outside the nominal
        // ranges; classify must always land in the known set.
        for ei in -40..300 {
            for mi in -4..16 {
                let elevation = ei as f32 * 0.5;
                let moisture = mi as f32 * 0.1;
                let biome = Biome::classify(elevation, moisture);
                assert!(Biome::all().contains(&biome));
            }
        }
    }

    #[test]
    fn test_boundary_cases() {
        // Just below the deep-water cutoff
        assert_eq!(Biome::classify(14.0, 0.5), Biome::DeepWater);
        // Deep-water cutoff itself is shallow water
        assert_eq!(Biome::classify(15.0, 0.5), Biome::ShallowWater);
        // Lowland with moisture at or above 0.6 becomes forest
        assert_eq!(Biome::classify(34.0, 0.65), Biome::Forest);
        assert_eq!(Biome::classify(34.0, 0.59), Biome::Plains);
        // High peaks are snow regardless of moisture
        assert_eq!(Biome::classify(75.0, 0.0), Biome::SnowCaps);
        assert_eq!(Biome::classify(75.0, 1.0), Biome::SnowCaps);
    }

    #[test]
    fn test_highland_moisture_split() {
        assert_eq!(Biome::classify(40.0, 0.39), Biome::Hills);
        assert_eq!(Biome::classify(40.0, 0.4), Biome::Forest);
        assert_eq!(Biome::classify(60.0, 1.0), Biome::Mountains);
    }

    #[test]
    fn test_water_and_peaks_not_walkable() {
        assert!(!Biome::DeepWater.properties().walkable);
        assert!(!Biome::ShallowWater.properties().walkable);
        assert!(!Biome::Mountains.properties().walkable);
        assert!(!Biome::SnowCaps.properties().walkable);
        assert!(Biome::Beach.properties().walkable);
        assert!(Biome::Plains.properties().walkable);
    }
}
