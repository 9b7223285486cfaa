use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading worldgen config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid worldgen config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub seed: i32,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub trees: Trees,
    #[serde(default)]
    pub ores: Ores,
    #[serde(default)]
    pub caves: Caves,
    #[serde(default)]
    pub clouds: Clouds,
    #[serde(default)]
    pub heightmap: HeightmapCfg,
}

/// One octave-noise layer. `offset` shifts the sample point before scaling;
/// non-integer offsets keep block centers off the gradient lattice.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NoiseParams {
    #[serde(default = "default_noise_freq")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default)]
    pub turbulent: bool,
    #[serde(default)]
    pub offset: [f32; 3],
}
fn default_noise_freq() -> f32 {
    1.0 / 32.0
}
fn default_octaves() -> u32 {
    4
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            frequency: default_noise_freq(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            turbulent: false,
            offset: [0.0; 3],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_base_height")]
    pub base: i32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_height_noise")]
    pub noise: NoiseParams,
}
fn default_base_height() -> i32 {
    32
}
fn default_amplitude() -> f32 {
    24.0
}
fn default_height_noise() -> NoiseParams {
    NoiseParams {
        frequency: 1.0 / 128.0,
        octaves: 4,
        offset: [0.5, 0.5, 0.0],
        ..NoiseParams::default()
    }
}
impl Default for Height {
    fn default() -> Self {
        Self {
            base: default_base_height(),
            amplitude: default_amplitude(),
            noise: default_height_noise(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_sand_level")]
    pub sand_level: i32,
    #[serde(default = "default_snow_level")]
    pub snow_level: i32,
}
fn default_sand_level() -> i32 {
    26
}
fn default_snow_level() -> i32 {
    50
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            sand_level: default_sand_level(),
            snow_level: default_snow_level(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Trees {
    /// Probability that a grass column grows a tree.
    #[serde(default = "default_tree_density")]
    pub density: f32,
}
fn default_tree_density() -> f32 {
    0.012
}
impl Default for Trees {
    fn default() -> Self {
        Self {
            density: default_tree_density(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ores {
    #[serde(default = "default_ore_threshold")]
    pub threshold: f32,
    #[serde(default = "default_ore_noise")]
    pub noise: NoiseParams,
}
fn default_ore_threshold() -> f32 {
    0.6
}
fn default_ore_noise() -> NoiseParams {
    NoiseParams {
        frequency: 1.0 / 12.0,
        octaves: 2,
        offset: [0.31, 0.17, 0.73],
        ..NoiseParams::default()
    }
}
impl Default for Ores {
    fn default() -> Self {
        Self {
            threshold: default_ore_threshold(),
            noise: default_ore_noise(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Caves {
    /// Fill noise at or below this value carves air out of the terrain.
    #[serde(default = "default_cave_threshold")]
    pub threshold: f32,
}
fn default_cave_threshold() -> f32 {
    -0.35
}
impl Default for Caves {
    fn default() -> Self {
        Self {
            threshold: default_cave_threshold(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Clouds {
    #[serde(default = "default_cloud_min_z")]
    pub min_z: i32,
    #[serde(default = "default_cloud_max_z")]
    pub max_z: i32,
    #[serde(default = "default_cloud_threshold")]
    pub threshold: f32,
    #[serde(default = "default_cloud_noise")]
    pub noise: NoiseParams,
}
fn default_cloud_min_z() -> i32 {
    96
}
fn default_cloud_max_z() -> i32 {
    104
}
fn default_cloud_threshold() -> f32 {
    -0.2
}
fn default_cloud_noise() -> NoiseParams {
    NoiseParams {
        frequency: 1.0 / 48.0,
        octaves: 3,
        offset: [0.5, 0.5, 0.5],
        ..NoiseParams::default()
    }
}
impl Default for Clouds {
    fn default() -> Self {
        Self {
            min_z: default_cloud_min_z(),
            max_z: default_cloud_max_z(),
            threshold: default_cloud_threshold(),
            noise: default_cloud_noise(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HeightmapCfg {
    /// Slots per axis, in chunk columns. Power of two.
    #[serde(default = "default_map_size")]
    pub map_size: usize,
}
fn default_map_size() -> usize {
    32
}
impl Default for HeightmapCfg {
    fn default() -> Self {
        Self {
            map_size: default_map_size(),
        }
    }
}

/// Flattened generator parameters used at runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub seed: i32,
    pub base_height: i32,
    pub amplitude: f32,
    pub height_noise: NoiseParams,
    pub sand_level: i32,
    pub snow_level: i32,
    pub tree_density: f32,
    pub ore_threshold: f32,
    pub ore_noise: NoiseParams,
    pub cave_threshold: f32,
    pub cloud_min_z: i32,
    pub cloud_max_z: i32,
    pub cloud_threshold: f32,
    pub cloud_noise: NoiseParams,
    pub map_size: usize,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            seed: cfg.seed,
            base_height: cfg.height.base,
            amplitude: cfg.height.amplitude,
            height_noise: cfg.height.noise.clone(),
            sand_level: cfg.surface.sand_level,
            snow_level: cfg.surface.snow_level,
            tree_density: cfg.trees.density,
            ore_threshold: cfg.ores.threshold,
            ore_noise: cfg.ores.noise.clone(),
            cave_threshold: cfg.caves.threshold,
            cloud_min_z: cfg.clouds.min_z,
            cloud_max_z: cfg.clouds.max_z,
            cloud_threshold: cfg.clouds.threshold,
            cloud_noise: cfg.clouds.noise.clone(),
            map_size: cfg.heightmap.map_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.map_size.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "heightmap.map_size must be a power of two, got {}",
                self.map_size
            )));
        }
        for (name, n) in [
            ("height.noise", &self.height_noise),
            ("ores.noise", &self.ore_noise),
            ("clouds.noise", &self.cloud_noise),
        ] {
            if n.octaves == 0 {
                return Err(ConfigError::Invalid(format!("{name}.octaves must be at least 1")));
            }
            if !(n.frequency.is_finite() && n.frequency > 0.0) {
                return Err(ConfigError::Invalid(format!("{name}.frequency must be positive")));
            }
        }
        if self.cloud_min_z >= self.cloud_max_z {
            return Err(ConfigError::Invalid(format!(
                "clouds.min_z ({}) must be below clouds.max_z ({})",
                self.cloud_min_z, self.cloud_max_z
            )));
        }
        if self.sand_level >= self.snow_level {
            return Err(ConfigError::Invalid(format!(
                "surface.sand_level ({}) must be below surface.snow_level ({})",
                self.sand_level, self.snow_level
            )));
        }
        Ok(())
    }
}

pub fn parse_params(src: &str) -> Result<WorldGenParams, ConfigError> {
    let cfg: WorldGenConfig = toml::from_str(src)?;
    let params = WorldGenParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path)?;
    let params = parse_params(&s)?;
    log::info!("loaded worldgen config from {} (seed {})", path.display(), params.seed);
    Ok(params)
}
