//! Runtime configuration.
//!
//! Settings are read from `<config dir>/hellogl/config.json`. Every field is optional, a missing
//! file means "use the defaults".

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Which iteration of the demo to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// A flat colored square.
    Quad,
    /// A cube with per-vertex colors.
    ColoredCube,
    /// A textured cube lit by a directional light.
    TexturedCube,
}

impl Variant {
    /// Directory under `shaders/` holding this variant's `vert.glsl` and `frag.glsl`.
    pub fn shader_dir(self) -> &'static str {
        match self {
            Self::Quad => "quad",
            Self::ColoredCube => "colored_cube",
            Self::TexturedCube => "textured_cube",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            width: 640,
            height: 480,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub variant: Variant,
    /// Radians per second.
    pub rotation_speed: f32,
    pub background: [f32; 4],
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub camera_distance: f32,
    pub log_level: String,
    pub resource_dir: Option<PathBuf>,
    pub texture: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            variant: Variant::TexturedCube,
            rotation_speed: 1.0,
            background: [0.1, 0.1, 0.2, 1.0],
            fov: 45.0,
            camera_distance: 4.0,
            log_level: "info".to_string(),
            resource_dir: None,
            texture: "container.png".to_string(),
        }
    }
}

#[cfg(target_os = "horizon")]
fn default_resource_root() -> PathBuf {
    PathBuf::from("romfs:/")
}

#[cfg(not(target_os = "horizon"))]
fn default_resource_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/resources"))
}

impl Config {
    /// Parses a config from JSON text.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Location of the user's config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hellogl").join("config.json"))
    }

    /// Loads the config at `path`, falling back to defaults when it is missing or malformed.
    ///
    /// Logging is not up yet when this runs, so problems are returned as warnings for the
    /// caller to report once the logger exists.
    pub fn load(path: Option<&Path>) -> (Self, Option<String>) {
        let Some(path) = path else {
            return (Self::default(), None);
        };
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_json(&text) {
                Ok(config) => (config, None),
                Err(e) => (
                    Self::default(),
                    Some(format!("ignoring malformed config {}: {e}", path.display())),
                ),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (Self::default(), None),
            Err(e) => (
                Self::default(),
                Some(format!("cannot read config {}: {e}", path.display())),
            ),
        }
    }

    /// Root directory for shaders and textures.
    pub fn resource_root(&self) -> PathBuf {
        self.resource_dir.clone().unwrap_or_else(default_resource_root)
    }

    /// Path of the shader source for the configured variant and the given file name.
    pub fn shader_path(&self, file_name: &str) -> PathBuf {
        self.resource_root()
            .join("shaders")
            .join(self.variant.shader_dir())
            .join(file_name)
    }

    pub fn texture_path(&self) -> PathBuf {
        self.resource_root().join("textures").join(&self.texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_json(
            r#"{ "variant": "colored_cube", "rotation_speed": 2.5, "window": { "vsync": false } }"#,
        )
        .unwrap();
        assert_eq!(config.variant, Variant::ColoredCube);
        assert_eq!(config.rotation_speed, 2.5);
        assert!(!config.window.vsync);
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.title, "Hello World");
        assert_eq!(config.texture, "container.png");
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(Config::from_json(r#"{ "variant": "teapot" }"#).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults_silently() {
        let path = std::env::temp_dir().join("hellogl-config-does-not-exist.json");
        let (config, warning) = Config::load(Some(&path));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_malformed_file_warns() {
        let path = std::env::temp_dir().join(format!("hellogl-bad-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let (config, warning) = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(warning.unwrap().contains("malformed"));
    }

    #[test]
    fn test_resource_paths() {
        let config = Config {
            resource_dir: Some(PathBuf::from("/data")),
            variant: Variant::Quad,
            ..Config::default()
        };
        assert_eq!(
            config.shader_path("vert.glsl"),
            PathBuf::from("/data/shaders/quad/vert.glsl")
        );
        assert_eq!(
            config.texture_path(),
            PathBuf::from("/data/textures/container.png")
        );
    }
}
