//! ASCII preview of a generated world
//!
//! Renders the tile grid as an elevation-band character map for quick
//! terminal inspection of the island shape, waterways and peaks.

use crate::biome::{BEACH_LEVEL, HILLS_LEVEL, MOUNTAIN_LEVEL, PLAINS_LEVEL, WATER_LEVEL};
use crate::world::World;

/// Get the preview character for an elevation value.
pub fn elevation_char(elevation: i32) -> char {
    let e = elevation as f32;
    if e < WATER_LEVEL - 5.0 {
        '~'
    } else if e < WATER_LEVEL {
        ','
    } else if e < BEACH_LEVEL {
        '.'
    } else if e < PLAINS_LEVEL {
        '"'
    } else if e < HILLS_LEVEL {
        'h'
    } else if e < MOUNTAIN_LEVEL {
        '^'
    } else {
        'M'
    }
}

/// Render the world as an ASCII map, one row per line.
pub fn render_ascii_map(world: &World) -> String {
    let mut out = String::with_capacity((world.width + 1) * world.height);

    for y in 0..world.height {
        for x in 0..world.width {
            out.push(elevation_char(world.tile(x, y).elevation));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::WorldSeeds;
    use crate::world::{generate_world, WorldConfig};

    #[test]
    fn test_elevation_bands() {
        assert_eq!(elevation_char(5), '~');
        assert_eq!(elevation_char(17), ',');
        assert_eq!(elevation_char(21), '.');
        assert_eq!(elevation_char(30), '"');
        assert_eq!(elevation_char(45), 'h');
        assert_eq!(elevation_char(60), '^');
        assert_eq!(elevation_char(90), 'M');
    }

    #[test]
    fn test_map_shape() {
        let config = WorldConfig {
            width: 12,
            height: 7,
            ..WorldConfig::default()
        };
        let world = generate_world(&config, &WorldSeeds::reference().with_tile_jitter(1)).unwrap();

        let rendered = render_ascii_map(&world);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().all(|line| line.chars().count() == 12));
    }
}
