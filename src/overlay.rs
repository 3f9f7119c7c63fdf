//! Debug grid overlay
//!
//! Visualization aid that paints alignment markers over the finished tile
//! grid: decimation points, the map boundary and the midlines. Kept out of
//! the generation pipeline so the core output stays presentation-agnostic;
//! enable it from the CLI when checking projection math.

use crate::world::World;

const DECIMATION_COLOR: [u8; 4] = [255, 0, 0, 255];
const BOUNDARY_COLOR: [u8; 4] = [255, 255, 0, 255];
const MIDLINE_COLOR: [u8; 4] = [0, 0, 255, 255];

/// Paint the debug markers onto the world's tile colors.
///
/// Precedence per tile: every tenth diagonal `(x + y) % 10 == 0` is red,
/// then the grid boundary is yellow, then either exact midline is blue.
/// All other tiles keep their biome colors.
pub fn apply_debug_grid(world: &mut World) {
    let width = world.width;
    let height = world.height;

    for y in 0..height {
        for x in 0..width {
            let color = if (x + y) % 10 == 0 {
                DECIMATION_COLOR
            } else if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                BOUNDARY_COLOR
            } else if x == width / 2 || y == height / 2 {
                MIDLINE_COLOR
            } else {
                continue;
            };
            world.tile_mut(x, y).color = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::WorldSeeds;
    use crate::world::{generate_world, WorldConfig};

    fn test_world() -> World {
        let config = WorldConfig {
            width: 20,
            height: 20,
            ..WorldConfig::default()
        };
        generate_world(&config, &WorldSeeds::reference().with_tile_jitter(5)).unwrap()
    }

    #[test]
    fn test_marker_precedence() {
        let mut world = test_world();
        apply_debug_grid(&mut world);

        // (0, 0) is on the boundary but also a decimation point: red wins
        assert_eq!(world.tile(0, 0).color, DECIMATION_COLOR);
        // (0, 1) is boundary only
        assert_eq!(world.tile(0, 1).color, BOUNDARY_COLOR);
        // (10, 3) is on the vertical midline, not boundary, (x+y)=13
        assert_eq!(world.tile(10, 3).color, MIDLINE_COLOR);
    }

    #[test]
    fn test_plain_tiles_keep_biome_colors() {
        let mut world = test_world();
        let before = *world.tile(3, 4); // (3+4)=7, interior, off-midline
        apply_debug_grid(&mut world);
        assert_eq!(world.tile(3, 4).color, before.color);
    }

    #[test]
    fn test_overlay_leaves_walkability_untouched() {
        let mut world = test_world();
        let walkable_before: Vec<bool> = world.iter().map(|(_, _, t)| t.walkable).collect();
        apply_debug_grid(&mut world);
        let walkable_after: Vec<bool> = world.iter().map(|(_, _, t)| t.walkable).collect();
        assert_eq!(walkable_before, walkable_after);
    }
}
