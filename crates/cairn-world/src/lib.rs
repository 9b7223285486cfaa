//! Procedural world: chunk addressing, noise, generator configuration, the
//! column heightmap and the layered block generator.

pub mod chunk_coord;
pub mod generation;
pub mod heightmap;
pub mod noise;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use generation::{ColumnTile, WorldGen};
pub use heightmap::{ColumnInfo, ColumnSource, Heightmap, HeightmapStats};
pub use noise::OctaveNoise;
pub use worldgen::{ConfigError, NoiseParams, WorldGenConfig, WorldGenParams, load_params_from_path, parse_params};

/// Edge length of a chunk in blocks. Must stay a power of two.
pub const CHUNK_SIZE: usize = 32;

const _: () = assert!(CHUNK_SIZE.is_power_of_two());
