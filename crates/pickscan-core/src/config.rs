//! Runtime tunables for the scanner and the lookup client.
//!
//! Plain structs, no global state and no environment reads: the application
//! populates them (from its TOML file or from defaults) and passes them to
//! the components that need them, which keeps every component constructible
//! in tests with hand-written values.

use std::fmt;
use std::time::Duration;

/// The decode box the engine concentrates on, in viewfinder pixels.
///
/// Frames are still captured full-size; the engine only analyses this
/// centred region, which is what makes the configured decode rate cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOfInterest {
    pub width: u32,
    pub height: u32,
}

/// Barcode symbologies the decode engine is asked to recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    Ean13,
    Ean8,
    UpcA,
    UpcE,
    Code128,
}

impl Symbology {
    /// Every symbology this build can decode.
    pub const ALL: [Symbology; 5] = [
        Symbology::Ean13,
        Symbology::Ean8,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Code128,
    ];

    /// Kebab-case name used in config files and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "ean-13",
            Symbology::Ean8 => "ean-8",
            Symbology::UpcA => "upc-a",
            Symbology::UpcE => "upc-e",
            Symbology::Code128 => "code-128",
        }
    }

    /// Parses the kebab-case name; `None` for names this build does not know.
    pub fn from_name(name: &str) -> Option<Symbology> {
        match name {
            "ean-13" => Some(Symbology::Ean13),
            "ean-8" => Some(Symbology::Ean8),
            "upc-a" => Some(Symbology::UpcA),
            "upc-e" => Some(Symbology::UpcE),
            "code-128" => Some(Symbology::Code128),
            _ => None,
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which camera the platform is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    /// Rear (environment-facing) camera, preferred for scanning shelves.
    Rear,
    /// Front (user-facing) camera.
    Front,
}

impl CameraFacing {
    /// Kebab-case name used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraFacing::Rear => "rear",
            CameraFacing::Front => "front",
        }
    }

    /// Parses the kebab-case name; `None` for anything else.
    pub fn from_name(name: &str) -> Option<CameraFacing> {
        match name {
            "rear" => Some(CameraFacing::Rear),
            "front" => Some(CameraFacing::Front),
            _ => None,
        }
    }
}

/// Camera-side scanner settings for one activation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Frames per second handed to the decode engine.
    pub decode_rate_fps: u32,
    /// Decode box the engine concentrates on.
    pub region_of_interest: RegionOfInterest,
    /// Viewfinder aspect ratio (width divided by height).
    pub aspect_ratio: f64,
    /// Symbologies the engine is configured for.
    pub symbologies: Vec<Symbology>,
    /// Camera the platform is asked for.
    pub facing: CameraFacing,
    /// How long one activation waits for a decode before giving up.
    pub scan_timeout: Duration,
}

impl Default for ScannerConfig {
    /// Reference values for a hand-held product scanner.
    ///
    /// | Field              | Default                                      |
    /// |--------------------|----------------------------------------------|
    /// | decode_rate_fps    | 10                                           |
    /// | region_of_interest | 250 × 150 px                                 |
    /// | aspect_ratio       | 16:9                                         |
    /// | symbologies        | EAN-13, EAN-8, UPC-A, UPC-E, CODE-128        |
    /// | facing             | Rear                                         |
    /// | scan_timeout       | 30 seconds                                   |
    fn default() -> Self {
        Self {
            decode_rate_fps: 10,
            region_of_interest: RegionOfInterest {
                width: 250,
                height: 150,
            },
            aspect_ratio: 16.0 / 9.0,
            symbologies: Symbology::ALL.to_vec(),
            facing: CameraFacing::Rear,
            scan_timeout: Duration::from_secs(30),
        }
    }
}

/// Product-lookup client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupConfig {
    /// Base URL of the product service, e.g. `http://127.0.0.1:8000/api/v1`.
    pub base_url: String,
    /// Deadline for one lookup request, connection included.
    pub timeout: Duration,
    /// Ask the service to bypass its product cache (`?force_refresh=true`).
    pub force_refresh: bool,
}

impl Default for LookupConfig {
    /// Defaults target a locally running product service with the reference
    /// 10-second lookup deadline.
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            timeout: Duration::from_secs(10),
            force_refresh: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
