//! Print layout configuration.
//!
//! Page size, output DPI, decoration placement and the public basemap
//! template are not derived from the map. They come from here, with
//! defaults suitable for an A4 landscape export.

use print_common::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default tile template for the public OpenStreetMap basemap.
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default attribution for the public OpenStreetMap basemap.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Layout settings applied to every print specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub page: PageSize,

    /// Output resolution in dots per inch
    pub dpi: u32,

    pub scale_bar: ScaleBarConfig,

    pub north_arrow: Position,

    /// Placement of the attribution block
    pub attributions: Position,

    pub basemap: BasemapConfig,

    /// Copy source attributions into WMS and WMTS descriptors.
    /// Off by default: those descriptors carry an empty attribution.
    pub propagate_attributions: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            page: PageSize::default(),
            dpi: 120,
            scale_bar: ScaleBarConfig::default(),
            north_arrow: Position::TopRight,
            attributions: Position::BottomRight,
            basemap: BasemapConfig::default(),
            propagate_attributions: false,
        }
    }
}

impl PrintConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> PrintResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| PrintError::Config(format!("Failed to parse print config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error: defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> PrintResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                "Print config file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            PrintError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&content)?;

        tracing::info!(path = %path.display(), dpi = config.dpi, "Loaded print config");
        Ok(config)
    }

    pub fn validate(&self) -> PrintResult<()> {
        if self.dpi == 0 {
            return Err(PrintError::Config("dpi must be positive".to_string()));
        }
        if !(self.page.width > 0.0 && self.page.height > 0.0) {
            return Err(PrintError::Config(format!(
                "page size must be positive, got {}x{}",
                self.page.width, self.page.height
            )));
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.basemap.url.contains(placeholder) {
                return Err(PrintError::Config(format!(
                    "basemap url is missing the {} placeholder: {}",
                    placeholder, self.basemap.url
                )));
            }
        }
        Ok(())
    }
}

/// Physical page size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
    pub unit: PageUnit,
}

impl Default for PageSize {
    fn default() -> Self {
        Self {
            width: 297.0,
            height: 210.0,
            unit: PageUnit::Mm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageUnit {
    Mm,
    Cm,
    In,
    Px,
}

/// Corner of the page a decoration is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleBarConfig {
    pub position: Position,
    pub units: ScaleBarUnits,
}

impl Default for ScaleBarConfig {
    fn default() -> Self {
        Self {
            position: Position::BottomLeft,
            units: ScaleBarUnits::Metric,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleBarUnits {
    Metric,
    Imperial,
    Nautical,
    Us,
    Degrees,
}

/// Tile template and attribution used for the public basemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasemapConfig {
    pub url: String,
    pub attribution: String,
}

impl Default for BasemapConfig {
    fn default() -> Self {
        Self {
            url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}
