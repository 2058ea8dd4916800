//! Render and camera configuration, stored as RON.
//!
//! Every field has a default, so a config file only needs to mention what it
//! overrides:
//!
//! ```text
//! (
//!     background: (16, 16, 24),
//!     camera: (position: (0.0, 2.0, 12.0), fov_degrees: 60.0),
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Output width in pixels.
pub const SCREEN_WIDTH: u32 = 512;
/// Output height in pixels.
pub const SCREEN_HEIGHT: u32 = 512;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16384;

/// Camera movement per step, in world units.
pub const TRANSLATE_STEP: f32 = 0.5;
/// Camera rotation per step, in degrees.
pub const ROTATE_STEP: f32 = 5.0;

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Camera placement and lens. Converted with
/// [`Camera::from_config`](crate::camera::Camera::from_config).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub forward: [f32; 3],
    pub right: [f32; 3],
    pub up: [f32; 3],
    pub fov_degrees: f32,
    pub near_clip: f32,
    pub far_clip: f32,
    pub aspect_ratio: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            forward: [0.0, 0.0, -1.0],
            right: [1.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            near_clip: 0.01,
            far_clip: 100.0,
            aspect_ratio: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 3],
    pub camera: CameraConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            background: [0, 0, 0],
            camera: CameraConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load and validate a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse and validate a config from a RON string.
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("    ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Checks image size and camera parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "image size {}x{} exceeds {MAX_DIMENSION} per side",
                self.width, self.height
            )));
        }
        crate::camera::Camera::from_config(&self.camera).map(|_| ())
    }
}
