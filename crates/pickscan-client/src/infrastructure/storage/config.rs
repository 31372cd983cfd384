//! TOML-based configuration persistence for the client application.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\PickScan\config.toml`
//! - Linux:    `~/.config/pickscan/config.toml`
//! - macOS:    `~/Library/Application Support/PickScan/config.toml`
//!
//! # Serde default values
//!
//! Every field is annotated with `#[serde(default = "some_fn")]`, so a
//! missing key falls back to the return value of `some_fn()`. A first run
//! with no config file at all, or an upgrade from an older file missing
//! newer fields, both load cleanly.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pickscan_core::{CameraFacing, LookupConfig, RegionOfInterest, ScannerConfig, Symbology};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configured barcode symbology name is not recognised.
    #[error("unknown barcode symbology in config: {0:?}")]
    UnknownSymbology(String),

    /// A configured camera facing name is not recognised.
    #[error("unknown camera facing in config: {0:?}")]
    UnknownFacing(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub lookup: LookupSection,
    #[serde(default)]
    pub scanner: ScannerSection,
}

/// General application behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Product lookup service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LookupSection {
    /// Base URL of the product service, up to and including the API prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-lookup deadline in milliseconds.
    #[serde(default = "default_lookup_timeout_ms")]
    pub timeout_ms: u64,
    /// Ask the service to bypass its cache and re-fetch from its upstream.
    #[serde(default)]
    pub force_refresh: bool,
}

/// Camera scanning settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannerSection {
    /// Decode attempts per second while scanning.
    #[serde(default = "default_decode_rate_fps")]
    pub decode_rate_fps: u32,
    /// Whole-scan deadline in milliseconds.
    #[serde(default = "default_scan_timeout_ms")]
    pub scan_timeout_ms: u64,
    /// Width of the decode region of interest in pixels.
    #[serde(default = "default_roi_width")]
    pub roi_width: u32,
    /// Height of the decode region of interest in pixels.
    #[serde(default = "default_roi_height")]
    pub roi_height: u32,
    /// Requested camera aspect ratio (width over height).
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: f64,
    /// Camera to ask the platform for: `"rear"` or `"front"`.
    #[serde(default = "default_facing")]
    pub facing: String,
    /// Barcode symbologies the decode engine should look for, by name
    /// (`"ean-13"`, `"ean-8"`, `"upc-a"`, `"upc-e"`, `"code-128"`).
    #[serde(default = "default_symbologies")]
    pub symbologies: Vec<String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_base_url() -> String {
    "http://127.0.0.1:8000/api/v1".to_string()
}
fn default_lookup_timeout_ms() -> u64 {
    10_000
}
fn default_decode_rate_fps() -> u32 {
    10
}
fn default_scan_timeout_ms() -> u64 {
    30_000
}
fn default_roi_width() -> u32 {
    250
}
fn default_roi_height() -> u32 {
    150
}
fn default_aspect_ratio() -> f64 {
    16.0 / 9.0
}
fn default_facing() -> String {
    CameraFacing::Rear.as_str().to_string()
}
fn default_symbologies() -> Vec<String> {
    Symbology::ALL.iter().map(|s| s.as_str().to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            lookup: LookupSection::default(),
            scanner: ScannerSection::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LookupSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_lookup_timeout_ms(),
            force_refresh: false,
        }
    }
}

impl Default for ScannerSection {
    fn default() -> Self {
        Self {
            decode_rate_fps: default_decode_rate_fps(),
            scan_timeout_ms: default_scan_timeout_ms(),
            roi_width: default_roi_width(),
            roi_height: default_roi_height(),
            aspect_ratio: default_aspect_ratio(),
            facing: default_facing(),
            symbologies: default_symbologies(),
        }
    }
}

// ── Conversions to runtime configs ────────────────────────────────────────────

impl LookupSection {
    /// Builds the runtime lookup configuration.
    pub fn to_lookup_config(&self) -> LookupConfig {
        LookupConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            force_refresh: self.force_refresh,
        }
    }
}

impl ScannerSection {
    /// Builds the runtime scanner configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownSymbology`] when a configured symbology
    /// name is not recognised, and [`ConfigError::UnknownFacing`] for an
    /// unrecognised camera facing. A typo here silently shrinking the set of
    /// readable barcodes would be much harder to notice than a refusal to
    /// start.
    pub fn to_scanner_config(&self) -> Result<ScannerConfig, ConfigError> {
        let mut symbologies = Vec::with_capacity(self.symbologies.len());
        for name in &self.symbologies {
            match Symbology::from_name(name) {
                Some(symbology) => symbologies.push(symbology),
                None => return Err(ConfigError::UnknownSymbology(name.clone())),
            }
        }
        let facing = CameraFacing::from_name(&self.facing)
            .ok_or_else(|| ConfigError::UnknownFacing(self.facing.clone()))?;
        Ok(ScannerConfig {
            decode_rate_fps: self.decode_rate_fps,
            region_of_interest: RegionOfInterest {
                width: self.roi_width,
                height: self.roi_height,
            },
            aspect_ratio: self.aspect_ratio,
            symbologies,
            facing,
            scan_timeout: Duration::from_millis(self.scan_timeout_ms),
        })
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from disk, returning `AppConfig::default()` if the file
/// does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to disk.
///
/// Creates the config directory and file if they do not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &config_file_path()?)
}

fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure directory exists before writing.
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory including the app subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("PickScan"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("pickscan"))
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/PickScan
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("PickScan")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        // Fallback for unsupported platforms.
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
