//! Print specification document and normalized layer descriptors.
//!
//! Field names follow the print service's JSON dialect (camelCase, layer
//! variants tagged by `type`).

use print_common::map::WmtsRequestEncoding;
use print_common::{BoundingBox, FeatureCollection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::{PageSize, Position, ScaleBarConfig};

/// Document handed to the print service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintSpec {
    /// Layers, bottom-most first
    pub layers: Vec<LayerDescriptor>,

    /// Page size
    pub size: PageSize,

    /// Center as geographic `[lon, lat]`
    pub center: [f64; 2],

    /// Output resolution in dots per inch
    pub dpi: u32,

    /// Scale denominator
    pub scale: f64,

    /// Projection code of the map view
    pub projection: String,

    pub scale_bar: ScaleBar,

    pub north_arrow: Position,

    /// Where the attribution block is placed
    pub attributions: Position,
}

/// Scale bar decoration.
pub type ScaleBar = ScaleBarConfig;

/// Normalized, source-format agnostic description of one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerDescriptor {
    #[serde(rename = "WMS")]
    Wms(WmsLayer),

    #[serde(rename = "WMTS")]
    Wmts(WmtsLayer),

    #[serde(rename = "XYZ")]
    Xyz(XyzLayer),

    #[serde(rename = "GeoJSON")]
    GeoJson(GeoJsonLayer),
}

impl LayerDescriptor {
    /// The `type` tag of this descriptor.
    pub fn type_name(&self) -> &'static str {
        match self {
            LayerDescriptor::Wms(_) => "WMS",
            LayerDescriptor::Wmts(_) => "WMTS",
            LayerDescriptor::Xyz(_) => "XYZ",
            LayerDescriptor::GeoJson(_) => "GeoJSON",
        }
    }

    pub fn attribution(&self) -> &str {
        match self {
            LayerDescriptor::Wms(l) => &l.attribution,
            LayerDescriptor::Wmts(l) => &l.attribution,
            LayerDescriptor::Xyz(l) => &l.attribution,
            LayerDescriptor::GeoJson(l) => &l.attribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsLayer {
    pub url: String,
    pub opacity: f64,
    pub attribution: String,

    /// Requested WMS layer name(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,

    pub tiled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmtsLayer {
    pub request_encoding: WmtsRequestEncoding,
    pub url: String,
    pub layer: String,
    pub projection: String,
    pub matrix_set: String,
    pub tile_grid: WmtsTileGrid,
    pub format: String,
    pub opacity: f64,
    pub attribution: String,
}

/// WMTS tile grid as the print service expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmtsTileGrid {
    pub resolutions: Vec<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extent: Option<BoundingBox>,

    /// Always `0..resolutions.len()`
    pub matrix_ids: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyzLayer {
    /// Tile URL template with `{z}`, `{x}` and `{y}` placeholders
    pub url: String,
    pub opacity: f64,
    pub attribution: String,
    pub tiled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonLayer {
    pub geojson: FeatureCollection,

    /// Translated style; absent for unstyled layers and per-feature styles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Value>,

    pub attribution: String,
}

/// Non-fatal finding raised while translating a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Index of the layer in the map's layer stack, once known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<usize>,

    pub kind: DiagnosticKind,

    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    StyleError,
    StyleWarning,
    UnsupportedStyleProperty,
    PerFeatureStyleIgnored,
    NonContiguousMatrixIds,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            layer: None,
            kind,
            message: message.into(),
        }
    }

    pub fn for_layer(mut self, index: usize) -> Self {
        self.layer = Some(index);
        self
    }

    /// Whether the finding means the printed layer may look wrong.
    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::StyleError | DiagnosticKind::NonContiguousMatrixIds
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.layer {
            Some(index) => write!(f, "layer {}: {:?}: {}", index, self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}
