//! Read-only model of an interactive map: its view and its layer stack.
//!
//! The source variant of every layer is fixed when the map is ingested, so
//! consumers match on [`LayerSource`] instead of probing capabilities at
//! runtime. Source types the model does not know about deserialize to
//! [`LayerSource::Unrecognized`].

use serde::de::{self, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::{Feature, LayerStyle, TileGrid, Units};

/// Snapshot of a map handed over for printing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapState {
    /// Current view
    pub view: ViewState,

    /// Layers, bottom-most first
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

impl MapState {
    pub fn new(view: ViewState) -> Self {
        Self {
            view,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: MapLayer) -> Self {
        self.layers.push(layer);
        self
    }
}

/// View state of the map. Every field may be absent when the map has not
/// been fully initialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Projection code (e.g. "EPSG:3857")
    #[serde(default)]
    pub projection: Option<String>,

    /// Unit system of the projection
    #[serde(default)]
    pub units: Option<Units>,

    /// Native units per pixel. Accepts numbers and numeric strings.
    #[serde(default, deserialize_with = "numeric_like")]
    pub resolution: Option<f64>,

    /// Center in the native projection
    #[serde(default)]
    pub center: Option<[f64; 2]>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericLike {
    Number(f64),
    Text(String),
}

fn numeric_like<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let resolution = match Option::<NumericLike>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumericLike::Number(n)) => n,
        Some(NumericLike::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("resolution is not numeric: {:?}", s)))?,
    };

    // Must be finite and non-negative; zero is allowed.
    if !resolution.is_finite() || resolution < 0.0 {
        return Err(de::Error::custom(format!(
            "resolution must be a finite, non-negative number, got {}",
            resolution
        )));
    }
    Ok(Some(resolution))
}

fn default_opacity() -> f64 {
    1.0
}

/// A single layer of the map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapLayer {
    /// Optional human-readable name, used in diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Opacity between 0 and 1
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Data source backing the layer
    pub source: LayerSource,

    /// Layer style (vector layers only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<LayerStyle>,
}

impl MapLayer {
    pub fn new(source: LayerSource) -> Self {
        Self {
            name: None,
            opacity: default_opacity(),
            source,
            style: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_style(mut self, style: LayerStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Data source variants a layer can be backed by.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerSource {
    #[serde(rename = "TileWMS")]
    TileWms(TileWmsSource),

    #[serde(rename = "ImageWMS")]
    ImageWms(ImageWmsSource),

    #[serde(rename = "WMTS")]
    Wmts(WmtsSource),

    /// Public OpenStreetMap basemap
    #[serde(rename = "OSM")]
    Osm(OsmSource),

    #[serde(rename = "Vector")]
    Vector(VectorSource),

    /// Any source type this model does not describe
    #[serde(other)]
    Unrecognized,
}

impl LayerSource {
    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            LayerSource::TileWms(_) => "TileWMS",
            LayerSource::ImageWms(_) => "ImageWMS",
            LayerSource::Wmts(_) => "WMTS",
            LayerSource::Osm(_) => "OSM",
            LayerSource::Vector(_) => "Vector",
            LayerSource::Unrecognized => "unrecognized",
        }
    }
}

/// WMS request parameters (LAYERS, STYLES, FORMAT, ...).
pub type WmsParams = BTreeMap<String, Value>;

/// Read the `LAYERS` parameter. Keys are matched case-insensitively, as
/// WMS parameter names are; an exact `LAYERS` key wins.
pub fn wms_layers_param(params: &WmsParams) -> Option<String> {
    let value = params.get("LAYERS").or_else(|| {
        params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("LAYERS"))
            .map(|(_, v)| v)
    })?;

    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Tiled WMS source, possibly load-balanced over several URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileWmsSource {
    #[serde(default)]
    pub urls: Vec<String>,

    #[serde(default)]
    pub params: WmsParams,

    #[serde(default)]
    pub attributions: Vec<String>,
}

/// Single-image WMS source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageWmsSource {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub params: WmsParams,

    #[serde(default)]
    pub attributions: Vec<String>,
}

/// WMTS request encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WmtsRequestEncoding {
    #[default]
    Kvp,
    Rest,
}

fn default_wmts_format() -> String {
    "image/png".to_string()
}

/// WMTS source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WmtsSource {
    #[serde(default)]
    pub urls: Vec<String>,

    /// Layer identifier
    pub layer: String,

    /// TileMatrixSet identifier
    pub matrix_set: String,

    /// Projection code of the tile matrix set
    pub projection: String,

    #[serde(default = "default_wmts_format")]
    pub format: String,

    #[serde(default)]
    pub request_encoding: WmtsRequestEncoding,

    pub tile_grid: TileGrid,

    #[serde(default)]
    pub attributions: Vec<String>,
}

/// OpenStreetMap basemap source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsmSource {
    /// Tile URL configured on the source
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub attributions: Vec<String>,
}

/// In-memory vector source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorSource {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_state_numeric_like_resolution() {
        let view: ViewState = serde_json::from_value(json!({
            "projection": "EPSG:3857",
            "units": "m",
            "resolution": "152.87",
            "center": [0.0, 0.0]
        }))
        .unwrap();
        assert_eq!(view.resolution, Some(152.87));

        let view: ViewState = serde_json::from_value(json!({ "resolution": 0 })).unwrap();
        assert_eq!(view.resolution, Some(0.0));

        let view: ViewState = serde_json::from_value(json!({ "resolution": null })).unwrap();
        assert_eq!(view.resolution, None);

        assert!(serde_json::from_value::<ViewState>(json!({ "resolution": "abc" })).is_err());
    }

    #[test]
    fn test_view_state_rejects_degenerate_resolution() {
        for bad in [json!("NaN"), json!("inf"), json!("-inf"), json!("-1.5"), json!(-2.0)] {
            let result = serde_json::from_value::<ViewState>(json!({ "resolution": bad }));
            assert!(result.is_err(), "accepted resolution {}", bad);
        }

        let view: ViewState = serde_json::from_value(json!({ "resolution": "0" })).unwrap();
        assert_eq!(view.resolution, Some(0.0));
    }

    #[test]
    fn test_view_state_rejects_unknown_units() {
        assert!(serde_json::from_value::<ViewState>(json!({ "units": "pixels" })).is_err());
    }

    #[test]
    fn test_layer_source_variants() {
        let layer: MapLayer = serde_json::from_value(json!({
            "opacity": 0.5,
            "source": {
                "type": "TileWMS",
                "urls": ["http://x/wms"],
                "params": {"LAYERS": "foo", "TILED": true}
            }
        }))
        .unwrap();
        assert_eq!(layer.opacity, 0.5);
        match layer.source {
            LayerSource::TileWms(src) => {
                assert_eq!(src.urls, vec!["http://x/wms"]);
                assert_eq!(wms_layers_param(&src.params).as_deref(), Some("foo"));
            }
            other => panic!("unexpected source: {}", other.kind()),
        }

        let layer: MapLayer =
            serde_json::from_value(json!({ "source": { "type": "OSM" } })).unwrap();
        assert_eq!(layer.opacity, 1.0);
        assert!(matches!(layer.source, LayerSource::Osm(_)));
    }

    #[test]
    fn test_unknown_source_type_is_unrecognized() {
        let layer: MapLayer = serde_json::from_value(json!({
            "source": { "type": "VectorTile", "url": "http://x/{z}/{x}/{y}.pbf" }
        }))
        .unwrap();
        assert!(matches!(layer.source, LayerSource::Unrecognized));
    }

    #[test]
    fn test_wms_layers_param_lookup() {
        let mut params = WmsParams::new();
        assert_eq!(wms_layers_param(&params), None);

        params.insert("layers".to_string(), json!(["a", "b"]));
        assert_eq!(wms_layers_param(&params).as_deref(), Some("a,b"));

        params.insert("LAYERS".to_string(), json!("c"));
        assert_eq!(wms_layers_param(&params).as_deref(), Some("c"));
    }

    #[test]
    fn test_wmts_source_defaults() {
        let src: WmtsSource = serde_json::from_value(json!({
            "urls": ["http://x/wmts"],
            "layer": "roads",
            "matrixSet": "GoogleMapsCompatible",
            "projection": "EPSG:3857",
            "tileGrid": {"resolutions": [100.0, 50.0]}
        }))
        .unwrap();
        assert_eq!(src.format, "image/png");
        assert_eq!(src.request_encoding, WmtsRequestEncoding::Kvp);
        assert!(src.tile_grid.matrix_ids.is_empty());
    }
}
