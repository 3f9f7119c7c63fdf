//! Terrain field synthesis
//!
//! Blends five independent fractal noise fields into raw elevation, moisture
//! and river-potential grids. A radial falloff shapes the landmass into an
//! island that fades toward ocean at the map edges.

use crate::noise::NoiseEngine;
use crate::seeds::WorldSeeds;
use crate::tilemap::Tilemap;

// =============================================================================
// TERRAIN PARAMETERS
// =============================================================================

/// Parameters for one fractal noise layer.
#[derive(Clone, Copy, Debug)]
pub struct LayerParams {
    /// Frequency multiplier applied to the normalized cell coordinates
    pub frequency: f32,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f32,
    /// Base frequency of the first octave
    pub scale: f32,
}

/// Parameters for the full terrain field.
pub struct TerrainParams {
    /// Broad continent-shape layer
    pub continent: LayerParams,
    /// High-frequency local detail layer
    pub detail: LayerParams,
    /// Mountain layer, post-processed into ridges
    pub mountain: LayerParams,
    /// Moisture layer
    pub moisture: LayerParams,
    /// River-potential layer
    pub rivers: LayerParams,
    /// Blend weights for continent / detail / ridged mountain
    pub continent_weight: f32,
    pub detail_weight: f32,
    pub mountain_weight: f32,
    /// Ridge sharpening exponent (higher = sharper peaks)
    pub ridge_exponent: f32,
    /// Island falloff exponent
    pub island_exponent: f32,
    /// Fraction of computed elevation retained at the map edges
    pub edge_floor: f32,
    /// Overall elevation scale
    pub elevation_scale: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            continent: LayerParams {
                frequency: 0.5,
                octaves: 4,
                persistence: 0.6,
                scale: 0.5,
            },
            detail: LayerParams {
                frequency: 5.0,
                octaves: 6,
                persistence: 0.5,
                scale: 2.0,
            },
            mountain: LayerParams {
                frequency: 3.0,
                octaves: 4,
                persistence: 0.7,
                scale: 1.5,
            },
            moisture: LayerParams {
                frequency: 4.0,
                octaves: 4,
                persistence: 0.5,
                scale: 2.0,
            },
            rivers: LayerParams {
                frequency: 8.0,
                octaves: 2,
                persistence: 0.7,
                scale: 3.0,
            },
            continent_weight: 0.5,
            detail_weight: 0.2,
            mountain_weight: 0.3,
            ridge_exponent: 3.0,
            island_exponent: 0.5,
            edge_floor: 0.3,
            elevation_scale: 100.0,
        }
    }
}

// =============================================================================
// TERRAIN FIELD
// =============================================================================

/// Intermediate per-cell terrain data, kept as one grid per field.
///
/// Owned by the generation pipeline and discarded once tiles are finalized.
pub struct TerrainField {
    pub elevation: Tilemap<f32>,
    pub moisture: Tilemap<f32>,
    pub river_potential: Tilemap<f32>,
}

impl TerrainField {
    pub fn width(&self) -> usize {
        self.elevation.width
    }

    pub fn height(&self) -> usize {
        self.elevation.height
    }
}

/// Build the raw terrain field for a `width` x `height` grid.
///
/// Each cell samples the five noise layers at its normalized coordinates,
/// blends continent, detail and ridged mountain into elevation, and stores
/// moisture and river potential unmodified. No classification happens here.
pub fn build_terrain_field(
    width: usize,
    height: usize,
    params: &TerrainParams,
    seeds: &WorldSeeds,
    engine: &mut NoiseEngine,
) -> TerrainField {
    let mut elevation = Tilemap::new_with(width, height, 0.0f32);
    let mut moisture = Tilemap::new_with(width, height, 0.0f32);
    let mut river_potential = Tilemap::new_with(width, height, 0.0f32);

    for y in 0..height {
        for x in 0..width {
            let nx = x as f32 / width as f32;
            let ny = y as f32 / height as f32;

            let continent = sample_layer(engine, nx, ny, &params.continent, seeds.continent);
            let detail = sample_layer(engine, nx, ny, &params.detail, seeds.detail);
            let mountain = sample_layer(engine, nx, ny, &params.mountain, seeds.mountain);
            let wet = sample_layer(engine, nx, ny, &params.moisture, seeds.moisture);
            let river = sample_layer(engine, nx, ny, &params.rivers, seeds.rivers);

            let ridged = ridge_transform(mountain, params.ridge_exponent);
            let island = island_factor(nx, ny, params.island_exponent);

            let raw = (continent * params.continent_weight
                + detail * params.detail_weight
                + ridged * params.mountain_weight)
                * params.elevation_scale;
            let shaped = raw * (island * (1.0 - params.edge_floor) + params.edge_floor);

            elevation.set(x, y, shaped);
            moisture.set(x, y, wet);
            river_potential.set(x, y, river);
        }
    }

    TerrainField {
        elevation,
        moisture,
        river_potential,
    }
}

fn sample_layer(engine: &mut NoiseEngine, nx: f32, ny: f32, layer: &LayerParams, seed: i32) -> f32 {
    engine.layered(
        nx * layer.frequency,
        ny * layer.frequency,
        layer.octaves,
        layer.persistence,
        layer.scale,
        seed,
    )
}

/// Fold fractal noise into sharp ridge lines: values near the noise's zero
/// crossings become the highest points.
fn ridge_transform(noise: f32, exponent: f32) -> f32 {
    let folded = 1.0 - (noise * 2.0 - 1.0).abs();
    folded.powf(exponent)
}

/// Radial falloff from the grid center, scaled so the far corner sits at
/// distance ~1.4. The square-root exponent keeps a wide, flat island top.
fn island_factor(nx: f32, ny: f32, exponent: f32) -> f32 {
    let dx = nx - 0.5;
    let dy = ny - 0.5;
    let distance = (dx * dx + dy * dy).sqrt() * 2.0;
    (1.0 - distance.min(1.0)).powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_dimensions() {
        let mut engine = NoiseEngine::new();
        let field = build_terrain_field(
            32,
            17,
            &TerrainParams::default(),
            &WorldSeeds::reference(),
            &mut engine,
        );
        assert_eq!(field.width(), 32);
        assert_eq!(field.height(), 17);
        assert_eq!(field.moisture.width, 32);
        assert_eq!(field.river_potential.height, 17);
    }

    #[test]
    fn test_field_deterministic() {
        let params = TerrainParams::default();
        let seeds = WorldSeeds::reference();

        let mut e1 = NoiseEngine::new();
        let mut e2 = NoiseEngine::new();
        let a = build_terrain_field(24, 24, &params, &seeds, &mut e1);
        let b = build_terrain_field(24, 24, &params, &seeds, &mut e2);

        for (x, y, &elev) in a.elevation.iter() {
            assert_eq!(elev, *b.elevation.get(x, y));
            assert_eq!(*a.moisture.get(x, y), *b.moisture.get(x, y));
            assert_eq!(*a.river_potential.get(x, y), *b.river_potential.get(x, y));
        }
    }

    #[test]
    fn test_island_factor_shape() {
        // Full strength at the center, zero beyond the unit radius
        assert!((island_factor(0.5, 0.5, 0.5) - 1.0).abs() < 1e-6);
        assert_eq!(island_factor(0.0, 0.0, 0.5), 0.0);
        assert_eq!(island_factor(1.0, 1.0, 0.5), 0.0);
        // Monotonically weaker away from the center
        let near = island_factor(0.55, 0.5, 0.5);
        let far = island_factor(0.8, 0.5, 0.5);
        assert!(near > far);
    }

    #[test]
    fn test_ridge_transform_peaks_at_zero_crossing() {
        // Noise value 0.5 maps to the fold's apex
        assert!((ridge_transform(0.5, 3.0) - 1.0).abs() < 1e-6);
        assert!(ridge_transform(0.0, 3.0).abs() < 1e-6);
        assert!(ridge_transform(1.0, 3.0).abs() < 1e-6);
        assert!(ridge_transform(0.3, 3.0) < ridge_transform(0.45, 3.0));
    }

    #[test]
    fn test_edge_retains_elevation_floor() {
        // With the island factor fully collapsed, the edge keeps edge_floor of
        // the raw elevation rather than dropping to a hard cliff.
        let params = TerrainParams::default();
        let island = island_factor(0.0, 0.0, params.island_exponent);
        let multiplier = island * (1.0 - params.edge_floor) + params.edge_floor;
        assert!((multiplier - params.edge_floor).abs() < 1e-6);
    }
}
