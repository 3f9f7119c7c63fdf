//! Island world generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod ascii;
pub mod biome;
pub mod export;
pub mod hydrology;
pub mod noise;
pub mod overlay;
pub mod seeds;
pub mod terrain;
pub mod tilemap;
pub mod world;
