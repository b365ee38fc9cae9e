use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::Projection;

/// Env var naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "LIVE_MAP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "live_map.toml";

/// Frame rate bounds; outside them the frame period is not a usable duration
const MIN_FPS: f32 = 0.1;
const MAX_FPS: f32 = 1000.0;

/// Map and viewer configuration.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Square window edge in pixels
    pub window_size: u32,
    /// Square map image edge in pixels
    pub map_image_size: f32,
    /// How much bigger the map image is than the in-game world, per axis
    pub world_to_map_scale_x: f32,
    pub world_to_map_scale_y: f32,
    pub map_image_offset_x: f32,
    pub map_image_offset_y: f32,

    pub fps: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub initial_zoom: f32,
    /// Zoom change per mouse wheel notch
    pub zoom_sensitivity: f32,

    pub marker_size: f32,
    pub icon_size: f32,

    pub bind_address: IpAddr,
    pub port: u16,

    /// Seconds an object may go without an update before it is dropped.
    /// `None` keeps objects until a clear rule removes them.
    pub object_ttl_secs: Option<f32>,

    pub assets: AssetPaths,
}

/// Image files, relative to `dir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub dir: String,
    pub overworld: String,
    pub caves: String,
    pub icons_dir: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            dir: "assets".to_string(),
            overworld: "overworld.jpg".to_string(),
            caves: "caves.jpg".to_string(),
            icons_dir: "icons".to_string(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            window_size: 1000,
            map_image_size: 4096.0,
            // 1750 * 2 world units -> 4096 px
            world_to_map_scale_x: 1.172_690_8,
            world_to_map_scale_y: 1.168,
            map_image_offset_x: 2.5,
            map_image_offset_y: 0.0,
            fps: 30.0,
            min_zoom: 0.75,
            max_zoom: 5.0,
            initial_zoom: 2.5,
            zoom_sensitivity: 0.1,
            marker_size: 7.0,
            icon_size: 64.0,
            bind_address: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 9999,
            object_ttl_secs: None,
            assets: AssetPaths::default(),
        }
    }
}

impl MapConfig {
    /// Load config from `path`, falling back to defaults if the file is absent.
    /// `LIVE_MAP_PORT` overrides the port either way.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let config: MapConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
            log::info!("Loaded config from {}", path.display());
            config
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Self::default()
        };

        if let Ok(port) = std::env::var("LIVE_MAP_PORT") {
            match port.parse::<u16>() {
                Ok(parsed) if parsed > 0 => config.port = parsed,
                _ => log::warn!("Invalid LIVE_MAP_PORT '{}', using {}", port, config.port),
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let positive = |value: f32| value.is_finite() && value > 0.0;

        if self.window_size == 0 {
            return invalid("window_size must be > 0");
        }
        if !positive(self.map_image_size) {
            return invalid("map_image_size must be finite and > 0");
        }
        let scales = [self.world_to_map_scale_x, self.world_to_map_scale_y];
        if scales.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return invalid("world_to_map scale must be finite and non-zero");
        }
        if !self.map_image_offset_x.is_finite() || !self.map_image_offset_y.is_finite() {
            return invalid("map image offsets must be finite");
        }
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return invalid("fps must lie within [0.1, 1000]");
        }
        if !positive(self.min_zoom) || !self.max_zoom.is_finite() || self.min_zoom > self.max_zoom {
            return invalid("zoom range must satisfy 0 < min_zoom <= max_zoom");
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return invalid("initial_zoom must lie within [min_zoom, max_zoom]");
        }
        if !positive(self.zoom_sensitivity) {
            return invalid("zoom_sensitivity must be finite and > 0");
        }
        if !positive(self.marker_size) || !positive(self.icon_size) {
            return invalid("marker_size and icon_size must be finite and > 0");
        }
        if self.port == 0 {
            return invalid("port cannot be 0");
        }
        if matches!(self.object_ttl_secs, Some(ttl) if !positive(ttl)) {
            return invalid("object_ttl_secs must be finite and > 0 when set");
        }
        Ok(())
    }

    pub fn projection(&self) -> Projection {
        Projection {
            image_size: self.map_image_size,
            scale_x: self.world_to_map_scale_x,
            scale_y: self.world_to_map_scale_y,
            offset_x: self.map_image_offset_x,
            offset_y: self.map_image_offset_y,
        }
    }

    pub fn frame_period_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }
}
