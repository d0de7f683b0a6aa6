// ============================================
// Config - Настройки сцены (JSON)
// ============================================
// Все поля имеют значения по умолчанию: пустой `{}` - валидный конфиг.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ultraviolet::Vec3;

use crate::player::{InputMotion, MotionPolicy, DEFAULT_MARKER_RADIUS, DEFAULT_SPAWN, DEFAULT_STEP};
use crate::terrain::{ClampPolicy, ExtentError, WorldExtent};

pub const DEFAULT_HEIGHTMAP: &str = "resources/heightmap.png";
pub const DEFAULT_FONT: &str = "resources/fonts/DejaVuSans.ttf";

/// Ошибки конфигурации
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Extent(#[from] ExtentError),
}

/// Окно
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "terrain-follow - heightmap sampling".to_string(),
            width: 800,
            height: 450,
            target_fps: 60,
        }
    }
}

/// Террейн
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub heightmap: PathBuf,
    /// Размер в мире: ширина, высота, глубина
    pub size: [f32; 3],
    /// Ближний угол террейна
    pub position: [f32; 3],
    pub clamp: ClampPolicy,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: PathBuf::from(DEFAULT_HEIGHTMAP),
            size: [16.0, 8.0, 16.0],
            position: [-8.0, 0.0, -8.0],
            clamp: ClampPolicy::default(),
        }
    }
}

/// Игрок
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub step: f32,
    pub motion: MotionPolicy,
    pub marker_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: DEFAULT_SPAWN,
            step: DEFAULT_STEP,
            motion: MotionPolicy::default(),
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

/// Камера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Вертикальный FOV в градусах
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 12.0, 16.0],
            target: [0.0, 0.0, 0.0],
            fov: 45.0,
        }
    }
}

/// Диагностический оверлей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub font: PathBuf,
    pub size: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font: PathBuf::from(DEFAULT_FONT),
            size: 24.0,
        }
    }
}

/// Полная конфигурация сцены
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub terrain: TerrainConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub overlay: OverlayConfig,
}

impl DemoConfig {
    /// Разобрать JSON строку
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить из файла
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded config '{}'", path.display());
        Ok(config)
    }

    /// Проверить значения, которые сломают цикл кадров
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.window.target_fps == 0 {
            return Err(ConfigError::Invalid("target_fps must be > 0".to_string()));
        }
        if !self.player.step.is_finite() || self.player.step < 0.0 {
            return Err(ConfigError::Invalid(format!("step must be >= 0, got {}", self.player.step)));
        }
        if !self.player.marker_radius.is_finite() || self.player.marker_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "marker_radius must be > 0, got {}",
                self.player.marker_radius
            )));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(ConfigError::Invalid(format!("fov must be in (0, 180), got {}", self.camera.fov)));
        }
        self.extent()?;
        Ok(())
    }

    /// Мировой объём террейна
    pub fn extent(&self) -> Result<WorldExtent, ExtentError> {
        WorldExtent::new(Vec3::from(self.terrain.size), Vec3::from(self.terrain.position))
    }

    pub fn motion(&self) -> InputMotion {
        InputMotion::new(self.player.step, self.player.motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = DemoConfig::from_json("{}").unwrap();
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.window.target_fps, 60);
        assert_eq!(config.player.spawn, [0.0, 0.5, 8.0]);
        assert_eq!(config.motion(), InputMotion::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "terrain": { "heightmap": "maps/canyon.png", "clamp": "cross_axis" },
            "player": { "motion": "diagonal", "step": 0.5 }
        }"#;
        let config = DemoConfig::from_json(json).unwrap();
        assert_eq!(config.terrain.heightmap, PathBuf::from("maps/canyon.png"));
        assert_eq!(config.terrain.clamp, ClampPolicy::CrossAxis);
        assert_eq!(config.terrain.size, [16.0, 8.0, 16.0]);
        assert_eq!(config.motion(), InputMotion::new(0.5, MotionPolicy::Diagonal));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DemoConfig::from_json(r#"{ "window": { "target_fps": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DemoConfig::from_json(r#"{ "terrain": { "size": [0.0, 8.0, 16.0] } }"#),
            Err(ConfigError::Extent(_))
        ));
        assert!(matches!(
            DemoConfig::from_json(r#"{ "player": { "step": -1.0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(DemoConfig::from_json("not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_assets_ship_with_crate() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let config = DemoConfig::default();
        assert!(root.join(&config.overlay.font).is_file());
        assert!(root.join(&config.terrain.heightmap).is_file());
    }

    #[test]
    fn test_load_from_file() {
        let missing = std::env::temp_dir().join("terrain_follow_missing_config.json");
        assert!(matches!(DemoConfig::load(&missing), Err(ConfigError::Read { .. })));

        let path = std::env::temp_dir().join("terrain_follow_test_config.json");
        let mut config = DemoConfig::default();
        config.window.target_fps = 30;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = DemoConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }
}
