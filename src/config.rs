//! Demo configuration
//!
//! Configuration is layered with the following priority (lowest to highest):
//! 1. per-demo defaults compiled into the binary
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`SPIN_SECTION__KEY`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Image files read by the textured demo
    #[serde(default)]
    pub assets: AssetConfig,
    /// Initial render parameters
    #[serde(default)]
    pub scene: SceneConfig,
    /// Tweak overlay
    #[serde(default)]
    pub gui: GuiConfig,
    /// Logger setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets: AssetConfig::default(),
            scene: SceneConfig::default(),
            gui: GuiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default `config` directory on top of
    /// the given defaults.
    pub fn load(defaults: AppConfig) -> Result<Self, ConfigError> {
        Self::load_from("config", defaults)
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P, defaults: AppConfig) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(defaults));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPIN_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SPIN_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Inner width in physical pixels
    pub width: u32,
    /// Inner height in physical pixels
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Wait for vertical sync on present
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
        }
    }
}

/// Image locations, relative to the working directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub data_dir: PathBuf,
    /// Sampled with nearest filtering
    pub base_image: String,
    /// Sampled with linear filtering and horizontally distorted
    pub distort_image: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            base_image: "doge.png".to_string(),
            distort_image: "grumpy.jpg".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn base_path(&self) -> PathBuf {
        self.data_dir.join(&self.base_image)
    }

    pub fn distort_path(&self) -> PathBuf {
        self.data_dir.join(&self.distort_image)
    }
}

/// Initial values of the tweakable render parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub wireframe: bool,
    /// RGB clear colour
    pub background: [f32; 3],
    /// Horizontal distortion strength
    pub force: f32,
    /// Distortion wave frequency multiplier
    pub amp: f32,
    /// Uniform model scale
    pub size: f32,
    /// 0 shows the base image, 1 the distorted one
    pub mix: f32,
    /// Euler angles in degrees (x, y, z)
    pub rotation: [f32; 3],
    pub camera_position: [f32; 3],
    /// Spin around +Z in degrees per second
    pub spin_rate: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            wireframe: false,
            background: [0.0, 0.0, 0.0],
            force: 0.05,
            amp: 1.0,
            size: 1.0,
            mix: 1.0,
            rotation: [0.0, 0.0, 0.0],
            camera_position: [1.0, 1.0, 1.0],
            spin_rate: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiConfig {
    pub enabled: bool,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// `filter` follows the `env_logger` filter syntax (e.g. "info",
/// "spin_demos=debug,wgpu_core=warn"). When unset, `RUST_LOG` is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "OpenGL");
        assert!(config.gui.enabled);
    }

    #[test]
    fn test_asset_paths() {
        let assets = AssetConfig::default();
        assert_eq!(assets.base_path(), Path::new("data").join("doge.png"));
        assert_eq!(assets.distort_path(), Path::new("data").join("grumpy.jpg"));
    }
}
