use crate::error::QuakeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

pub const CONFIG_PATH: &str = "quakevis_config.toml";

pub const MILLIS_PER_YEAR: i64 = 365 * 24 * 60 * 60 * 1000;

static CONFIG: OnceLock<Mutex<QuakeVisConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it on first use.
/// A missing or broken file falls back to defaults.
pub fn get_config() -> QuakeVisConfig {
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(QuakeVisConfig::load_or_default(CONFIG_PATH)));
    match config_mutex.lock() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn reload_config() -> Result<(), QuakeError> {
    let new_config = QuakeVisConfig::load_from_file(CONFIG_PATH)?;
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    match config_mutex.lock() {
        Ok(mut config) => *config = new_config,
        Err(poisoned) => *poisoned.into_inner() = new_config,
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuakeVisConfig {
    pub data: DataConfig,
    pub earth: EarthConfig,
    pub markers: MarkerConfig,
    pub playback: PlaybackConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub catalog_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EarthConfig {
    pub grid_resolution: usize,
    pub axial_tilt_degrees: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub duration_years: f32,
    pub scale_per_magnitude: f32,
    pub decay_per_frame: f32,
    pub low_color: [f32; 3],
    pub high_color: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Simulated milliseconds per wall-clock second at speed 1.0.
    pub millis_per_second: f64,
    pub playback_speed: f32,
    pub rotation_speed: f32,
    pub axis_tilt_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("assets/data/earthquakes.txt"),
        }
    }
}

impl Default for EarthConfig {
    fn default() -> Self {
        Self {
            grid_resolution: crate::mesh_data::DEFAULT_GRID_RESOLUTION,
            axial_tilt_degrees: crate::morph::EARTH_AXIAL_TILT_DEGREES,
        }
    }
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            duration_years: 1.0,
            scale_per_magnitude: 0.006,
            decay_per_frame: 0.99,
            low_color: [1.0, 0.9, 0.2],
            high_color: [0.9, 0.05, 0.05],
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            millis_per_second: MILLIS_PER_YEAR as f64,
            playback_speed: 0.5,
            rotation_speed: 0.3,
            axis_tilt_offset: 0.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            min_distance: 1.5,
            max_distance: 10.0,
            fov_degrees: 60.0,
        }
    }
}

impl MarkerConfig {
    pub fn duration_millis(&self) -> i64 {
        ((self.duration_years.max(0.0) as f64) * MILLIS_PER_YEAR as f64).round() as i64
    }
}

impl QuakeVisConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, QuakeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| QuakeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| QuakeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{err}; using default configuration");
                Self::default()
            }
        }
    }
}
