//! Common test fixtures for map print tests.
//!
//! Builders for views and for one layer of every source variant, with
//! values that resemble real deployments.

use print_common::map::{
    ImageWmsSource, OsmSource, TileWmsSource, VectorSource, WmsParams, WmtsRequestEncoding,
    WmtsSource,
};
use print_common::crs::MERCATOR_MAX_EXTENT;
use print_common::{
    BoundingBox, Feature, Geometry, LayerSource, LayerStyle, MapLayer, MapState, TileGrid, Units,
    ViewState,
};
use serde_json::{json, Value};

/// Common view definitions for testing.
pub mod view {
    /// Bern, Switzerland, in Web Mercator meters
    pub const BERN_3857: [f64; 2] = [828_228.6, 5_933_779.0];

    /// Bern, Switzerland, in degrees
    pub const BERN_LON_LAT: [f64; 2] = [7.4401, 46.9492];

    /// Resolution of Web Mercator zoom 12 (meters per pixel)
    pub const ZOOM_12_RESOLUTION: f64 = 38.21851414258813;
}

/// A complete Web Mercator view centered on Bern.
pub fn web_mercator_view(resolution: f64) -> ViewState {
    ViewState {
        projection: Some("EPSG:3857".to_string()),
        units: Some(Units::Meters),
        resolution: Some(resolution),
        center: Some(view::BERN_3857),
    }
}

/// A complete geographic view centered on Bern.
pub fn geographic_view(resolution: f64) -> ViewState {
    ViewState {
        projection: Some("EPSG:4326".to_string()),
        units: Some(Units::Degrees),
        resolution: Some(resolution),
        center: Some(view::BERN_LON_LAT),
    }
}

/// A map over a zoom 12 Web Mercator view.
pub fn map_with_layers(layers: impl IntoIterator<Item = MapLayer>) -> MapState {
    MapState {
        view: web_mercator_view(view::ZOOM_12_RESOLUTION),
        layers: layers.into_iter().collect(),
    }
}

fn layers_param(layers: &str) -> WmsParams {
    let mut params = WmsParams::new();
    params.insert("LAYERS".to_string(), json!(layers));
    params.insert("FORMAT".to_string(), json!("image/png"));
    params
}

pub fn tile_wms_layer(url: &str, layers: &str) -> MapLayer {
    MapLayer::new(LayerSource::TileWms(TileWmsSource {
        urls: vec![url.to_string()],
        params: layers_param(layers),
        attributions: vec!["© Tiled WMS provider".to_string()],
    }))
}

pub fn image_wms_layer(url: &str, layers: &str) -> MapLayer {
    MapLayer::new(LayerSource::ImageWms(ImageWmsSource {
        url: Some(url.to_string()),
        params: layers_param(layers),
        attributions: vec!["© Image WMS provider".to_string()],
    }))
}

/// Standard pixel size in meters (OGC WMTS, 0.28mm).
pub const STANDARD_PIXEL_SIZE: f64 = 0.00028;

/// Scale denominator of Web Mercator zoom level 0 at 256px tiles.
const WEB_MERCATOR_SCALE_0: f64 = 559082264.0287178;

/// Calculate the resolution (units per pixel) for a scale denominator.
pub fn resolution_from_scale_denominator(scale_denominator: f64) -> f64 {
    scale_denominator * STANDARD_PIXEL_SIZE
}

/// Standard Web Mercator (Google/OSM) tile grid, zoom 0 to `max_zoom`.
pub fn web_mercator_tile_grid(max_zoom: u32) -> TileGrid {
    let resolutions = (0..=max_zoom)
        .map(|z| {
            let n = 2u32.pow(z);
            resolution_from_scale_denominator(WEB_MERCATOR_SCALE_0 / (n as f64))
        })
        .collect();

    TileGrid::new(resolutions).with_extent(BoundingBox::new(
        -MERCATOR_MAX_EXTENT,
        -MERCATOR_MAX_EXTENT,
        MERCATOR_MAX_EXTENT,
        MERCATOR_MAX_EXTENT,
    ))
}

/// WMTS layer over the standard Web Mercator grid.
pub fn wmts_layer(max_zoom: u32) -> MapLayer {
    wmts_layer_with_grid(web_mercator_tile_grid(max_zoom))
}

pub fn wmts_layer_with_grid(tile_grid: TileGrid) -> MapLayer {
    MapLayer::new(LayerSource::Wmts(WmtsSource {
        urls: vec!["https://wmts.example.com/1.0.0/WMTSCapabilities.xml".to_string()],
        layer: "ch.swisstopo.pixelkarte-farbe".to_string(),
        matrix_set: "GoogleMapsCompatible".to_string(),
        projection: "EPSG:3857".to_string(),
        format: "image/jpeg".to_string(),
        request_encoding: WmtsRequestEncoding::Rest,
        tile_grid,
        attributions: vec!["© swisstopo".to_string()],
    }))
}

/// OpenStreetMap basemap, optionally pointing at a custom tile server.
pub fn osm_layer(url: Option<&str>) -> MapLayer {
    MapLayer::new(LayerSource::Osm(OsmSource {
        url: url.map(str::to_string),
        attributions: Vec::new(),
    }))
}

/// `count` point features along the equator.
pub fn point_features(count: usize) -> Vec<Feature> {
    (0..count)
        .map(|i| Feature::new(Geometry::point(i as f64 * 1000.0, 0.0)).with_property("index", i))
        .collect()
}

pub fn vector_layer(features: Vec<Feature>) -> MapLayer {
    MapLayer::new(LayerSource::Vector(VectorSource { features }))
}

/// Vector layer carrying a uniform style.
pub fn styled_vector_layer(style: Value) -> MapLayer {
    vector_layer(point_features(2)).with_style(LayerStyle::uniform(style))
}

/// A layer whose source type has no print representation.
pub fn unrecognized_layer() -> MapLayer {
    MapLayer::new(LayerSource::Unrecognized).with_name("vector tiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_mercator_resolutions() {
        let grid = web_mercator_tile_grid(3);
        assert_eq!(grid.resolutions.len(), 4);
        assert!((grid.resolutions[0] - 156543.03392804097).abs() < 1e-6);
        assert!((grid.resolutions[1] - grid.resolutions[0] / 2.0).abs() < 1e-6);
        assert_eq!(grid.matrix_ids, vec!["0", "1", "2", "3"]);
        assert!(grid.has_contiguous_matrix_ids());
    }

    #[test]
    fn test_zoom_12_resolution_matches_grid() {
        let grid = web_mercator_tile_grid(12);
        assert!((grid.resolutions[12] - view::ZOOM_12_RESOLUTION).abs() < 1e-9);
    }
}
