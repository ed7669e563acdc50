//! Configuration file handling
//!
//! Settings live in `~/.maplayer/config.ini`:
//!
//! ```ini
//! [style]
//! url = https://na-maps.vng-solutions.com/styles/spl_bgmaps/style.json
//! timeout_secs = 30
//! cache_ttl_secs = 0
//!
//! [camera]
//! center = Riyadh
//! zoom = 16
//! animation_duration_ms = 1000
//! animation_mode = linearTo
//!
//! [bounds]
//! region = bangladesh
//! ```
//!
//! Every key is optional; missing keys keep their built-in default. The
//! `MAPLAYER_STYLE_URL` environment variable takes precedence over
//! `[style] url`.
//!
//! Keys are addressed as `section.key` through [`ConfigKey`], which is what
//! the `config get` / `config set` commands use.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::camera::{AnimationMode, CameraConfig, City, DEFAULT_CAMERA, MAX_ZOOM, MIN_ZOOM};
use crate::coord::{GeoBounds, Region};
use crate::style::{DEFAULT_STYLE_URL, DEFAULT_TIMEOUT_SECS, MAX_CACHE_TTL};

/// Environment variable overriding `[style] url`.
pub const ENV_STYLE_URL: &str = "MAPLAYER_STYLE_URL";

const CONFIG_DIR_NAME: &str = ".maplayer";
const CONFIG_FILE_NAME: &str = "config.ini";

/// Errors from reading, writing or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[style]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSettings {
    pub url: String,
    pub timeout_secs: u64,
    /// Lifetime of the shared style cache; 0 disables it.
    pub cache_ttl_secs: u64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_STYLE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_ttl_secs: 0,
        }
    }
}

impl StyleSettings {
    /// Endpoint to use, honoring `MAPLAYER_STYLE_URL`.
    pub fn effective_url(&self) -> String {
        self.resolve_url(std::env::var(ENV_STYLE_URL).ok())
    }

    /// Endpoint to use given an override value. Blank overrides are ignored.
    pub fn resolve_url(&self, env_override: Option<String>) -> String {
        match env_override {
            Some(url) if !url.trim().is_empty() => {
                debug!(url = %url, "Style URL overridden from environment");
                url.trim().to_string()
            }
            _ => self.url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Shared cache lifetime, or `None` when the cache is disabled.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }
}

/// `[camera]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    pub center: City,
    pub zoom: f64,
    pub animation_duration_ms: u64,
    pub animation_mode: AnimationMode,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            center: City::Riyadh,
            zoom: DEFAULT_CAMERA.zoom,
            animation_duration_ms: DEFAULT_CAMERA.animation_duration.as_millis() as u64,
            animation_mode: DEFAULT_CAMERA.animation_mode,
        }
    }
}

impl CameraSettings {
    pub fn to_camera_config(&self) -> CameraConfig {
        CameraConfig {
            center: self.center.coordinates(),
            zoom: self.zoom,
            animation_duration: Duration::from_millis(self.animation_duration_ms),
            animation_mode: self.animation_mode,
        }
        .with_zoom(self.zoom)
    }
}

/// `[bounds]` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundsSettings {
    pub region: Region,
}

impl BoundsSettings {
    pub fn bounds(&self) -> GeoBounds {
        self.region.bounds()
    }
}

/// The full configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub style: StyleSettings,
    pub camera: CameraSettings,
    pub bounds: BoundsSettings,
}

impl ConfigFile {
    /// Loads `~/.maplayer/config.ini`, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse(e.to_string()),
        })?;

        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Saves to `~/.maplayer/config.ini`, creating the directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini.write_to_file(path).map_err(io_err)?;

        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }
}

/// Directory holding MapLayer configuration.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn config_file_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// A settable configuration key, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    StyleUrl,
    StyleTimeoutSecs,
    StyleCacheTtlSecs,
    CameraCenter,
    CameraZoom,
    CameraAnimationDurationMs,
    CameraAnimationMode,
    BoundsRegion,
}

impl ConfigKey {
    /// All keys, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::StyleUrl,
            ConfigKey::StyleTimeoutSecs,
            ConfigKey::StyleCacheTtlSecs,
            ConfigKey::CameraCenter,
            ConfigKey::CameraZoom,
            ConfigKey::CameraAnimationDurationMs,
            ConfigKey::CameraAnimationMode,
            ConfigKey::BoundsRegion,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::StyleUrl | ConfigKey::StyleTimeoutSecs | ConfigKey::StyleCacheTtlSecs => {
                "style"
            }
            ConfigKey::CameraCenter
            | ConfigKey::CameraZoom
            | ConfigKey::CameraAnimationDurationMs
            | ConfigKey::CameraAnimationMode => "camera",
            ConfigKey::BoundsRegion => "bounds",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::StyleUrl => "url",
            ConfigKey::StyleTimeoutSecs => "timeout_secs",
            ConfigKey::StyleCacheTtlSecs => "cache_ttl_secs",
            ConfigKey::CameraCenter => "center",
            ConfigKey::CameraZoom => "zoom",
            ConfigKey::CameraAnimationDurationMs => "animation_duration_ms",
            ConfigKey::CameraAnimationMode => "animation_mode",
            ConfigKey::BoundsRegion => "region",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value rendered as it would appear in the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::StyleUrl => config.style.url.clone(),
            ConfigKey::StyleTimeoutSecs => config.style.timeout_secs.to_string(),
            ConfigKey::StyleCacheTtlSecs => config.style.cache_ttl_secs.to_string(),
            ConfigKey::CameraCenter => config.camera.center.to_string(),
            ConfigKey::CameraZoom => config.camera.zoom.to_string(),
            ConfigKey::CameraAnimationDurationMs => config.camera.animation_duration_ms.to_string(),
            ConfigKey::CameraAnimationMode => config.camera.animation_mode.to_string(),
            ConfigKey::BoundsRegion => config.bounds.region.to_string(),
        }
    }

    /// Validates and stores `value`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason,
        };

        match self {
            ConfigKey::StyleUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(invalid("expected an http:// or https:// URL".to_string()));
                }
                config.style.url = value.to_string();
            }
            ConfigKey::StyleTimeoutSecs => {
                let secs: u64 = value.parse().map_err(|_| invalid("expected seconds".to_string()))?;
                if secs == 0 {
                    return Err(invalid("timeout must be at least 1 second".to_string()));
                }
                config.style.timeout_secs = secs;
            }
            ConfigKey::StyleCacheTtlSecs => {
                let secs: u64 = value.parse().map_err(|_| invalid("expected seconds".to_string()))?;
                if secs > MAX_CACHE_TTL.as_secs() {
                    return Err(invalid(format!(
                        "cache lifetime must be at most {} seconds",
                        MAX_CACHE_TTL.as_secs()
                    )));
                }
                config.style.cache_ttl_secs = secs;
            }
            ConfigKey::CameraCenter => {
                config.camera.center = value.parse().map_err(|e: crate::camera::CameraError| {
                    invalid(e.to_string())
                })?;
            }
            ConfigKey::CameraZoom => {
                let zoom: f64 = value.parse().map_err(|_| invalid("expected a number".to_string()))?;
                if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                    return Err(invalid(format!(
                        "zoom must be between {} and {}",
                        MIN_ZOOM, MAX_ZOOM
                    )));
                }
                config.camera.zoom = zoom;
            }
            ConfigKey::CameraAnimationDurationMs => {
                config.camera.animation_duration_ms = value
                    .parse()
                    .map_err(|_| invalid("expected milliseconds".to_string()))?;
            }
            ConfigKey::CameraAnimationMode => {
                config.camera.animation_mode = value.parse().map_err(
                    |e: crate::camera::CameraError| invalid(e.to_string()),
                )?;
            }
            ConfigKey::BoundsRegion => {
                config.bounds.region = value
                    .parse()
                    .map_err(|e: crate::coord::CoordError| invalid(e.to_string()))?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
