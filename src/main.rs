use clap::Parser;

mod ascii;
mod biome;
mod export;
mod hydrology;
mod noise;
mod overlay;
mod seeds;
mod terrain;
mod tilemap;
mod world;

use biome::Biome;
use seeds::WorldSeeds;
use world::{generate_world, WorldConfig};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island tile worlds")]
struct Args {
    /// Width of the world in tiles
    #[arg(short = 'W', long, default_value = "128")]
    width: usize,

    /// Height of the world in tiles
    #[arg(short = 'H', long, default_value = "128")]
    height: usize,

    /// Master seed (uses the reference field seeds if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seed the per-tile color jitter for reproducible colors
    #[arg(long)]
    jitter_seed: Option<u64>,

    /// Paint the debug alignment grid over the tile colors
    #[arg(long)]
    debug_grid: bool,

    /// Print an ASCII preview of the world
    #[arg(long)]
    ascii: bool,

    /// Export the tile colors to a PNG (specify output path)
    #[arg(long)]
    export_map: Option<String>,

    /// Export the elevation field to a grayscale PNG
    #[arg(long)]
    export_elevation: Option<String>,

    /// Export the tile grid to a JSON file
    #[arg(long)]
    export_json: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut seeds = match args.seed {
        Some(master) => WorldSeeds::from_master(master),
        None => WorldSeeds::reference(),
    };
    if let Some(jitter) = args.jitter_seed {
        seeds = seeds.with_tile_jitter(jitter);
    }

    let config = WorldConfig {
        width: args.width,
        height: args.height,
        ..WorldConfig::default()
    };

    println!("Generating island world...");
    println!("World size: {}x{}", args.width, args.height);
    println!("Seeds: {}", seeds);

    let mut world = match generate_world(&config, &seeds) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let stats = world.stats().clone();
    println!("World generation complete!");
    println!(
        "Water tiles: {} ({:.1}%)",
        stats.water_tiles,
        stats.percent(stats.water_tiles)
    );
    println!(
        "Land tiles: {} ({:.1}%)",
        stats.land_tiles,
        stats.percent(stats.land_tiles)
    );
    println!(
        "Mountain tiles: {} ({:.1}%)",
        stats.mountain_tiles,
        stats.percent(stats.mountain_tiles)
    );

    println!("Biome distribution:");
    for (i, biome) in Biome::all().iter().enumerate() {
        let count = stats.biome_counts[i];
        if count > 0 {
            println!(
                "  {:<13} {:>6} ({:.1}%)",
                biome.display_name(),
                count,
                stats.percent(count)
            );
        }
    }

    if args.debug_grid {
        println!("Applying debug alignment grid...");
        overlay::apply_debug_grid(&mut world);
    }

    if args.ascii {
        println!("{}", ascii::render_ascii_map(&world));
    }

    if let Some(ref path) = args.export_map {
        match export::export_world_map(&world, path) {
            Ok(()) => println!("Exported world map to: {}", path),
            Err(e) => eprintln!("Failed to export world map: {}", e),
        }
    }

    if let Some(ref path) = args.export_elevation {
        match export::export_elevation_map(&world, path) {
            Ok(()) => println!("Exported elevation map to: {}", path),
            Err(e) => eprintln!("Failed to export elevation map: {}", e),
        }
    }

    if let Some(ref path) = args.export_json {
        match export::export_world_json(&world, path) {
            Ok(()) => println!("Exported world JSON to: {}", path),
            Err(e) => eprintln!("Failed to export world JSON: {}", e),
        }
    }
}
