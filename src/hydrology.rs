//! Water-feature carving and elevation smoothing
//!
//! Post-processes the raw terrain field: carves river channels and tributary
//! beds where river potential runs high, sinks low wet ground into lakes, then
//! smooths land elevation with a 3x3 convolution that leaves carved water
//! untouched.

use crate::biome::WATER_LEVEL;
use crate::terrain::TerrainField;

/// River potential above this carves a main channel.
pub const RIVER_THRESHOLD: f32 = 0.82;
/// Width of the tributary band just below the main threshold.
const TRIBUTARY_BAND: f32 = 0.1;
/// Maximum depth a full-strength channel is carved below the waterline.
const CHANNEL_DEPTH: f32 = 5.0;
/// Fixed depth of tributary beds below the waterline.
const TRIBUTARY_DEPTH: f32 = 1.0;
/// Land within this margin above the waterline can flood into a lake.
const LAKE_MARGIN: f32 = 5.0;
/// Depth lakes settle below the waterline.
const LAKE_DEPTH: f32 = 2.0;
/// Moisture required for lake formation.
const LAKE_MOISTURE: f32 = 0.7;

/// Weight of the neighborhood mean when smoothing land cells.
const SMOOTH_BLEND: f32 = 0.7;

/// Carve river channels, tributaries and lakes into the terrain field.
///
/// Purely per-cell: every adjustment clamps elevation downward with `min`, so
/// carving never raises ground and reapplying the pass changes nothing.
pub fn carve_water_features(field: &mut TerrainField) {
    let width = field.width();
    let height = field.height();

    for y in 0..height {
        for x in 0..width {
            let river = *field.river_potential.get(x, y);
            let moisture = *field.moisture.get(x, y);
            let elevation = field.elevation.get_mut(x, y);

            if river > RIVER_THRESHOLD {
                // Main channel, deeper the further past the threshold
                let strength = (river - RIVER_THRESHOLD) / (1.0 - RIVER_THRESHOLD);
                *elevation = elevation.min(WATER_LEVEL - strength * CHANNEL_DEPTH);
            } else if river > RIVER_THRESHOLD - TRIBUTARY_BAND {
                // Shallower tributary bed feeding the main channels
                *elevation = elevation.min(WATER_LEVEL - TRIBUTARY_DEPTH);
            }

            // Low, wet depressions flood into small lakes
            if *elevation < WATER_LEVEL + LAKE_MARGIN && moisture > LAKE_MOISTURE {
                *elevation = elevation.min(WATER_LEVEL - LAKE_DEPTH);
            }
        }
    }
}

/// Smooth the elevation grid with a 3x3 neighborhood average.
///
/// Cells at or below the waterline pass through unchanged so carved river and
/// lake edges stay crisp; land cells blend 70/30 with their neighborhood
/// mean. The whole pass reads the pre-smoothing grid: results go to a
/// separate buffer that replaces the field only once every cell is done.
pub fn smooth_elevation(field: &mut TerrainField) {
    let width = field.width();
    let height = field.height();
    let mut smoothed = field.elevation.clone();

    for y in 0..height {
        for x in 0..width {
            let own = *field.elevation.get(x, y);
            if own <= WATER_LEVEL {
                continue;
            }
            let mean = field.elevation.neighborhood_mean(x, y);
            smoothed.set(x, y, mean * SMOOTH_BLEND + own * (1.0 - SMOOTH_BLEND));
        }
    }

    field.elevation = smoothed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::Tilemap;

    fn flat_field(width: usize, height: usize, elevation: f32) -> TerrainField {
        TerrainField {
            elevation: Tilemap::new_with(width, height, elevation),
            moisture: Tilemap::new_with(width, height, 0.0),
            river_potential: Tilemap::new_with(width, height, 0.0),
        }
    }

    #[test]
    fn test_carving_never_raises_elevation() {
        let mut field = flat_field(8, 8, 60.0);
        for y in 0..8 {
            for x in 0..8 {
                field
                    .river_potential
                    .set(x, y, (x as f32 * 0.13 + y as f32 * 0.11).sin().abs());
                field.moisture.set(x, y, (y as f32 * 0.17).cos().abs());
            }
        }
        let before = field.elevation.clone();

        carve_water_features(&mut field);

        for (x, y, &after) in field.elevation.iter() {
            assert!(after <= *before.get(x, y));
        }
    }

    #[test]
    fn test_carving_is_idempotent() {
        let mut field = flat_field(8, 8, 60.0);
        for y in 0..8 {
            for x in 0..8 {
                field.river_potential.set(x, y, 0.1 + 0.1 * x as f32);
                field.moisture.set(x, y, 0.12 * y as f32);
            }
        }

        carve_water_features(&mut field);
        let once = field.elevation.clone();
        carve_water_features(&mut field);

        for (x, y, &twice) in field.elevation.iter() {
            assert_eq!(twice, *once.get(x, y));
        }
    }

    #[test]
    fn test_main_channel_depth_scales_with_potential() {
        let mut field = flat_field(2, 1, 80.0);
        field.river_potential.set(0, 0, 0.91); // strength 0.5
        field.river_potential.set(1, 0, 1.0); // strength 1.0

        carve_water_features(&mut field);

        assert!((*field.elevation.get(0, 0) - (WATER_LEVEL - 2.5)).abs() < 1e-4);
        assert!((*field.elevation.get(1, 0) - (WATER_LEVEL - 5.0)).abs() < 1e-4);
    }

    #[test]
    fn test_tributary_band_carves_shallow_bed() {
        let mut field = flat_field(3, 1, 80.0);
        field.river_potential.set(0, 0, 0.80); // inside the band
        field.river_potential.set(1, 0, 0.82); // band upper edge (inclusive)
        field.river_potential.set(2, 0, 0.71); // below the band

        carve_water_features(&mut field);

        assert_eq!(*field.elevation.get(0, 0), WATER_LEVEL - TRIBUTARY_DEPTH);
        assert_eq!(*field.elevation.get(1, 0), WATER_LEVEL - TRIBUTARY_DEPTH);
        assert_eq!(*field.elevation.get(2, 0), 80.0);
    }

    #[test]
    fn test_lake_forms_in_low_wet_ground() {
        let mut field = flat_field(2, 1, WATER_LEVEL + 3.0);
        field.moisture.set(0, 0, 0.8);
        field.moisture.set(1, 0, 0.5); // too dry

        carve_water_features(&mut field);

        assert_eq!(*field.elevation.get(0, 0), WATER_LEVEL - LAKE_DEPTH);
        assert_eq!(*field.elevation.get(1, 0), WATER_LEVEL + 3.0);
    }

    #[test]
    fn test_high_ground_resists_lakes() {
        let mut field = flat_field(1, 1, WATER_LEVEL + 20.0);
        field.moisture.set(0, 0, 1.0);

        carve_water_features(&mut field);

        assert_eq!(*field.elevation.get(0, 0), WATER_LEVEL + 20.0);
    }

    #[test]
    fn test_smoothing_preserves_underwater_cells() {
        let mut field = flat_field(5, 5, 50.0);
        field.elevation.set(2, 2, WATER_LEVEL - 4.0);
        field.elevation.set(0, 0, WATER_LEVEL);

        smooth_elevation(&mut field);

        assert_eq!(*field.elevation.get(2, 2), WATER_LEVEL - 4.0);
        assert_eq!(*field.elevation.get(0, 0), WATER_LEVEL);
    }

    #[test]
    fn test_smoothing_blends_land_with_neighborhood() {
        let mut field = flat_field(3, 3, 40.0);
        field.elevation.set(1, 1, 76.0);

        smooth_elevation(&mut field);

        // Center: mean = (8*40 + 76) / 9 = 44, blended 0.7*44 + 0.3*76
        let expected = 44.0 * 0.7 + 76.0 * 0.3;
        assert!((*field.elevation.get(1, 1) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_smoothing_reads_pre_pass_snapshot() {
        // The spike at (0, 0) must feed its neighbors' means even though the
        // pass visits (0, 0) first.
        let mut field = flat_field(3, 1, 40.0);
        field.elevation.set(0, 0, 100.0);

        smooth_elevation(&mut field);

        // (1, 0): mean over (0..=2, 0) = (100 + 40 + 40) / 3 = 60
        let expected = 60.0 * 0.7 + 40.0 * 0.3;
        assert!((*field.elevation.get(1, 0) - expected).abs() < 1e-4);
    }
}
