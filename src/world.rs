//! World generation pipeline and output grid
//!
//! Runs the full pipeline (terrain field -> water carving -> smoothing ->
//! biome classification -> tile finalization) and bundles the finished tile
//! grid. Generation is synchronous and single-threaded: one call returns the
//! complete world.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::biome::{Biome, MOUNTAIN_LEVEL, WATER_LEVEL};
use crate::hydrology::{carve_water_features, smooth_elevation};
use crate::noise::NoiseEngine;
use crate::seeds::WorldSeeds;
use crate::terrain::{build_terrain_field, TerrainField, TerrainParams};
use crate::tilemap::Tilemap;

/// Reference world dimensions.
pub const WORLD_WIDTH: usize = 128;
pub const WORLD_HEIGHT: usize = 128;

/// Per-channel range of the tile color jitter.
const COLOR_JITTER: i32 = 5;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for one generation run.
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub terrain: TerrainParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            terrain: TerrainParams::default(),
        }
    }
}

impl WorldConfig {
    /// Check the configuration before generation starts.
    ///
    /// Malformed parameters fail here with a clear error instead of
    /// propagating into silently corrupt output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let layers = [
            ("continent", &self.terrain.continent),
            ("detail", &self.terrain.detail),
            ("mountain", &self.terrain.mountain),
            ("moisture", &self.terrain.moisture),
            ("rivers", &self.terrain.rivers),
        ];
        for (name, layer) in layers {
            if layer.octaves == 0 {
                return Err(ConfigError::ZeroOctaves { layer: name });
            }
            if !(layer.persistence > 0.0 && layer.persistence <= 1.0) {
                return Err(ConfigError::InvalidPersistence {
                    layer: name,
                    value: layer.persistence,
                });
            }
        }

        Ok(())
    }
}

/// Configuration errors reported before any terrain is generated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroDimensions { width: usize, height: usize },
    ZeroOctaves { layer: &'static str },
    InvalidPersistence { layer: &'static str, value: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroDimensions { width, height } => {
                write!(f, "world dimensions must be nonzero (got {}x{})", width, height)
            }
            ConfigError::ZeroOctaves { layer } => {
                write!(f, "noise layer '{}' must have at least one octave", layer)
            }
            ConfigError::InvalidPersistence { layer, value } => {
                write!(
                    f,
                    "noise layer '{}' persistence must be in (0, 1], got {}",
                    layer, value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// One finished world tile. Immutable once generation completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub elevation: i32,
    pub color: [u8; 4],
    pub walkable: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            elevation: 0,
            color: [0, 0, 0, 255],
            walkable: false,
        }
    }
}

/// Tile counts gathered while finalizing the grid.
#[derive(Clone, Debug, Default)]
pub struct WorldStats {
    pub water_tiles: usize,
    pub land_tiles: usize,
    pub mountain_tiles: usize,
    /// Tile count per biome, indexed in `Biome::all()` order.
    pub biome_counts: [usize; 8],
}

impl WorldStats {
    pub fn total(&self) -> usize {
        self.water_tiles + self.land_tiles + self.mountain_tiles
    }

    pub fn percent(&self, count: usize) -> f32 {
        if self.total() == 0 {
            0.0
        } else {
            100.0 * count as f32 / self.total() as f32
        }
    }
}

/// The finished world: a row-major grid of tiles plus the seeds that built it.
///
/// Read-only for downstream consumers; the movement layer reads `elevation`
/// and `walkable`, the renderer reads position, elevation and color.
#[derive(Debug)]
pub struct World {
    pub width: usize,
    pub height: usize,
    pub seeds: WorldSeeds,
    tiles: Tilemap<Tile>,
    stats: WorldStats,
}

impl World {
    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        self.tiles.get(x, y)
    }

    /// Iterate all tiles row-major with their grid coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        self.tiles.iter()
    }

    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.tiles.get(x, y).walkable
    }

    pub fn elevation_at(&self, x: usize, y: usize) -> i32 {
        self.tiles.get(x, y).elevation
    }

    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    pub(crate) fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        self.tiles.get_mut(x, y)
    }
}

// =============================================================================
// GENERATION PIPELINE
// =============================================================================

/// Generate a complete world grid.
///
/// The terrain field is built, carved and smoothed, then every cell is
/// classified and finalized into its output tile. The intermediate field is
/// dropped before returning.
pub fn generate_world(config: &WorldConfig, seeds: &WorldSeeds) -> Result<World, ConfigError> {
    config.validate()?;

    let mut engine = NoiseEngine::new();
    let mut field = build_terrain_field(
        config.width,
        config.height,
        &config.terrain,
        seeds,
        &mut engine,
    );

    carve_water_features(&mut field);
    smooth_elevation(&mut field);

    let mut jitter_rng = match seeds.tile_jitter {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let (tiles, stats) = finalize_tiles(&field, &mut jitter_rng);

    Ok(World {
        width: config.width,
        height: config.height,
        seeds: seeds.clone(),
        tiles,
        stats,
    })
}

/// Classify every cell and write the output tiles.
///
/// Elevation is integer-truncated; walkability and base color come from the
/// biome properties table, with each color channel jittered independently.
/// Tiles are finalized row-major, so a seeded jitter RNG reproduces colors
/// exactly.
fn finalize_tiles<R: Rng>(field: &TerrainField, jitter_rng: &mut R) -> (Tilemap<Tile>, WorldStats) {
    let width = field.width();
    let height = field.height();
    let mut tiles = Tilemap::new_with(width, height, Tile::default());
    let mut stats = WorldStats::default();

    for y in 0..height {
        for x in 0..width {
            let elevation = *field.elevation.get(x, y);
            let moisture = *field.moisture.get(x, y);

            let biome = Biome::classify(elevation, moisture);
            let props = biome.properties();

            stats.biome_counts[biome as usize] += 1;
            if elevation < WATER_LEVEL {
                stats.water_tiles += 1;
            } else if elevation > MOUNTAIN_LEVEL {
                stats.mountain_tiles += 1;
            } else {
                stats.land_tiles += 1;
            }

            tiles.set(
                x,
                y,
                Tile {
                    x: x as i32,
                    y: y as i32,
                    elevation: elevation as i32,
                    color: jitter_color(props.base_color, jitter_rng),
                    walkable: props.walkable,
                },
            );
        }
    }

    (tiles, stats)
}

/// Jitter each RGB channel by a uniform integer in [-5, 5], clamped to the
/// byte range. Alpha stays opaque.
fn jitter_color<R: Rng>(base: [u8; 4], rng: &mut R) -> [u8; 4] {
    let mut color = base;
    for channel in color.iter_mut().take(3) {
        let jittered = *channel as i32 + rng.gen_range(-COLOR_JITTER..=COLOR_JITTER);
        *channel = jittered.clamp(0, 255) as u8;
    }
    color[3] = 255;
    color
}
