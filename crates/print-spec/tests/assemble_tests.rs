//! Tests for print specification assembly.

use std::sync::Arc;
use std::time::Duration;

use print_common::{MapState, PrintError, Units, ViewState};
use print_spec::config::{PageUnit, Position, ScaleBarUnits};
use print_spec::{compute_scale, DiagnosticKind, LayerDescriptor, PrintConfig, SpecAssembler};
use serde_json::json;
use test_utils::*;

fn assembler() -> SpecAssembler {
    SpecAssembler::new(
        PrintConfig::default(),
        Arc::new(ScriptedStyleTranslator::new()),
    )
}

fn type_names(layers: &[LayerDescriptor]) -> Vec<&'static str> {
    layers.iter().map(LayerDescriptor::type_name).collect()
}

// ============================================================================
// View state validation
// ============================================================================

#[tokio::test]
async fn test_missing_resolution_is_rejected() {
    let mut map = map_with_layers(vec![osm_layer(None)]);
    map.view.resolution = None;

    let err = assembler().build_spec(&map).await.unwrap_err();
    match err {
        PrintError::IncompleteViewState { missing } => assert_eq!(missing, vec!["resolution"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_all_missing_fields_reported() {
    let map = MapState::new(ViewState::default());

    let err = assembler().build_spec(&map).await.unwrap_err();
    match err {
        PrintError::IncompleteViewState { missing } => {
            assert_eq!(missing, vec!["projection", "units", "resolution", "center"])
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_view_is_validated_before_layers() {
    let styles = Arc::new(ScriptedStyleTranslator::new());
    let assembler = SpecAssembler::new(PrintConfig::default(), styles.clone());

    let mut map = map_with_layers(vec![styled_vector_layer(json!({"output": {}}))]);
    map.view.center = None;

    assert!(assembler.build_spec(&map).await.is_err());
    assert_eq!(styles.calls(), 0);
}

#[tokio::test]
async fn test_zero_resolution_is_accepted() {
    let mut map = map_with_layers(Vec::new());
    map.view.resolution = Some(0.0);

    let build = assembler().build_spec(&map).await.unwrap();
    assert_eq!(build.spec.scale, 0.0);
}

#[tokio::test]
async fn test_unsupported_projection() {
    let mut map = map_with_layers(Vec::new());
    map.view.projection = Some("EPSG:2056".to_string());

    let err = assembler().build_spec(&map).await.unwrap_err();
    assert!(matches!(err, PrintError::UnsupportedProjection(_)));
}

// ============================================================================
// Document contents
// ============================================================================

#[tokio::test]
async fn test_spec_document_fields() {
    let map = map_with_layers(vec![osm_layer(None)]);
    let build = assembler().build_spec(&map).await.unwrap();
    let spec = build.spec;

    assert_eq!(spec.projection, "EPSG:3857");
    assert_approx_eq!(
        spec.scale,
        compute_scale(view::ZOOM_12_RESOLUTION, Units::Meters),
        1e-9
    );
    assert_coords_approx_eq!(spec.center, view::BERN_LON_LAT, 1e-3);
    assert_eq!(spec.dpi, 120);
    assert_eq!(spec.size.width, 297.0);
    assert_eq!(spec.size.height, 210.0);
    assert_eq!(spec.size.unit, PageUnit::Mm);
    assert_eq!(spec.scale_bar.position, Position::BottomLeft);
    assert_eq!(spec.scale_bar.units, ScaleBarUnits::Metric);
    assert_eq!(spec.north_arrow, Position::TopRight);
    assert_eq!(spec.attributions, Position::BottomRight);
    assert_eq!(type_names(&spec.layers), vec!["XYZ"]);
}

#[tokio::test]
async fn test_geographic_center_is_unchanged() {
    let map = MapState::new(geographic_view(0.0001)).with_layer(osm_layer(None));
    let build = assembler().build_spec(&map).await.unwrap();

    assert_eq!(build.spec.center, view::BERN_LON_LAT);
    assert_approx_eq!(
        build.spec.scale,
        compute_scale(0.0001, Units::Degrees),
        1e-9
    );
}

#[tokio::test]
async fn test_spec_json_shape() {
    let map = map_with_layers(vec![tile_wms_layer("http://x/wms", "foo")]);
    let build = assembler().build_spec(&map).await.unwrap();

    let value = serde_json::to_value(&build.spec).unwrap();
    assert_eq!(value["projection"], "EPSG:3857");
    assert_eq!(value["size"], json!({"width": 297.0, "height": 210.0, "unit": "mm"}));
    assert_eq!(
        value["scaleBar"],
        json!({"position": "bottom-left", "units": "metric"})
    );
    assert_eq!(value["northArrow"], "top-right");
    assert_eq!(value["attributions"], "bottom-right");
    assert_eq!(value["layers"][0]["type"], "WMS");
    assert_eq!(value["layers"][0]["layer"], "foo");
}

#[tokio::test]
async fn test_configured_layout_is_used() {
    let config = PrintConfig::from_yaml_str(
        "dpi: 300\npage:\n  width: 420\n  height: 297\nnorth_arrow: top-left\n",
    )
    .unwrap();
    let assembler = SpecAssembler::new(config, Arc::new(ScriptedStyleTranslator::new()));

    let build = assembler
        .build_spec(&map_with_layers(Vec::new()))
        .await
        .unwrap();
    assert_eq!(build.spec.dpi, 300);
    assert_eq!(build.spec.size.width, 420.0);
    assert_eq!(build.spec.north_arrow, Position::TopLeft);
}

// ============================================================================
// Layer ordering and filtering
// ============================================================================

#[tokio::test]
async fn test_unrecognized_layers_dropped_in_order() {
    for k in 0..4 {
        let mut layers = vec![
            osm_layer(None),
            tile_wms_layer("http://x/wms", "foo"),
            wmts_layer(2),
            vector_layer(point_features(1)),
        ];
        let expected: Vec<&str> = ["XYZ", "WMS", "WMTS", "GeoJSON"]
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .map(|(_, t)| *t)
            .collect();
        layers[k] = unrecognized_layer();

        let build = assembler()
            .build_spec(&map_with_layers(layers))
            .await
            .unwrap();

        assert_eq!(build.spec.layers.len(), 3);
        assert_eq!(type_names(&build.spec.layers), expected);
    }
}

#[tokio::test]
async fn test_empty_layer_stack() {
    let build = assembler()
        .build_spec(&map_with_layers(Vec::new()))
        .await
        .unwrap();
    assert!(build.spec.layers.is_empty());
    assert!(build.diagnostics.is_empty());
}

#[tokio::test]
async fn test_order_kept_when_styles_resolve_out_of_order() {
    let map = map_with_layers(vec![
        styled_vector_layer(json!({"delay_ms": 50, "output": {"name": "slow"}})),
        styled_vector_layer(json!({"output": {"name": "fast"}})),
    ]);

    let build = assembler().build_spec(&map).await.unwrap();
    let names: Vec<_> = build
        .spec
        .layers
        .iter()
        .map(|l| match l {
            LayerDescriptor::GeoJson(g) => g.style.as_ref().unwrap()["name"].clone(),
            other => panic!("expected GeoJSON, got {}", other.type_name()),
        })
        .collect();
    assert_eq!(names, vec![json!("slow"), json!("fast")]);
}

#[tokio::test]
async fn test_diagnostics_carry_layer_index() {
    let map = map_with_layers(vec![
        unrecognized_layer(),
        osm_layer(None),
        styled_vector_layer(json!({"warnings": ["label placement approximated"]})),
    ]);

    let build = assembler().build_spec(&map).await.unwrap();
    assert_eq!(build.diagnostics.len(), 1);
    assert_eq!(build.diagnostics[0].layer, Some(2));
    assert_eq!(build.diagnostics[0].kind, DiagnosticKind::StyleWarning);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_one_rejected_style_fails_whole_build() {
    let map = map_with_layers(vec![
        osm_layer(None),
        styled_vector_layer(json!({"output": {"name": "ok"}})),
        styled_vector_layer(json!({"delay_ms": 10, "fail": "unsupported expression"})),
    ]);

    let err = assembler().build_spec(&map).await.unwrap_err();
    match &err {
        PrintError::SpecBuildFailed(inner) => {
            assert!(matches!(**inner, PrintError::StyleTranslation(_)))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_layers_translated_concurrently() {
    // Both translations must be in flight together for either to finish.
    let assembler = SpecAssembler::new(
        PrintConfig::default(),
        Arc::new(BarrierStyleTranslator::new(2)),
    );
    let map = map_with_layers(vec![
        styled_vector_layer(json!({"name": "a"})),
        styled_vector_layer(json!({"name": "b"})),
    ]);

    let build = tokio::time::timeout(Duration::from_secs(5), assembler.build_spec(&map))
        .await
        .expect("layer translations ran sequentially")
        .unwrap();
    assert_eq!(build.spec.layers.len(), 2);
}
