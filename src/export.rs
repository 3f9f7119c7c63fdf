//! Diagnostic exports for generated worlds
//!
//! PNG renderings of the tile colors and the elevation field, plus a JSON
//! dump of the full tile grid.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use image::{ImageBuffer, Rgba, RgbaImage};
use serde::Serialize;

use crate::world::{Tile, World};

/// Export the world's tile colors as a PNG.
pub fn export_world_map(world: &World, path: &str) -> Result<(), image::ImageError> {
    let mut img: RgbaImage = ImageBuffer::new(world.width as u32, world.height as u32);

    for (x, y, tile) in world.iter() {
        img.put_pixel(x as u32, y as u32, Rgba(tile.color));
    }

    img.save(path)
}

/// Export the elevation field as a normalized grayscale PNG.
pub fn export_elevation_map(world: &World, path: &str) -> Result<(), image::ImageError> {
    let mut min_e = i32::MAX;
    let mut max_e = i32::MIN;
    for (_, _, tile) in world.iter() {
        min_e = min_e.min(tile.elevation);
        max_e = max_e.max(tile.elevation);
    }
    let range = (max_e - min_e).max(1) as f32;

    let mut img: RgbaImage = ImageBuffer::new(world.width as u32, world.height as u32);
    for (x, y, tile) in world.iter() {
        let t = (tile.elevation - min_e) as f32 / range;
        let v = (t * 255.0) as u8;
        img.put_pixel(x as u32, y as u32, Rgba([v, v, v, 255]));
    }

    img.save(path)
}

#[derive(Serialize)]
struct WorldDump<'a> {
    width: usize,
    height: usize,
    tiles: Vec<&'a Tile>,
}

/// Export the tile grid as JSON (row-major tile list).
pub fn export_world_json(world: &World, path: &str) -> Result<(), Box<dyn Error>> {
    let dump = WorldDump {
        width: world.width,
        height: world.height,
        tiles: world.iter().map(|(_, _, tile)| tile).collect(),
    };

    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &dump)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::WorldSeeds;
    use crate::world::{generate_world, WorldConfig};

    #[test]
    fn test_json_roundtrip_shape() {
        let config = WorldConfig {
            width: 6,
            height: 5,
            ..WorldConfig::default()
        };
        let world = generate_world(&config, &WorldSeeds::reference().with_tile_jitter(3)).unwrap();

        let dump = WorldDump {
            width: world.width,
            height: world.height,
            tiles: world.iter().map(|(_, _, tile)| tile).collect(),
        };
        let json = serde_json::to_string(&dump).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["width"], 6);
        assert_eq!(parsed["height"], 5);
        assert_eq!(parsed["tiles"].as_array().unwrap().len(), 30);
        assert_eq!(parsed["tiles"][0]["x"], 0);
        assert_eq!(parsed["tiles"][29]["y"], 4);
    }
}
