//! Print specification assembly.

use std::sync::Arc;

use futures::future::try_join_all;
use print_common::crs::center_to_lon_lat;
use print_common::{
    MapState, PassthroughStyleTranslator, PrintError, PrintResult, StyleTranslator, Units,
    ViewState,
};
use tracing::{error, info, instrument};

use crate::descriptor::{Diagnostic, PrintSpec};
use crate::{compute_scale, LayerTranslator, PrintConfig};

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecBuild {
    pub spec: PrintSpec,

    /// Non-fatal findings, tagged with the index of the layer they concern
    pub diagnostics: Vec<Diagnostic>,
}

/// View fields required to build a spec.
struct RequiredView<'a> {
    projection: &'a str,
    units: Units,
    resolution: f64,
    center: [f64; 2],
}

impl<'a> RequiredView<'a> {
    /// Absent fields are reported together. A zero resolution is accepted.
    fn from_view(view: &'a ViewState) -> PrintResult<Self> {
        let projection = view.projection.as_deref().filter(|p| !p.trim().is_empty());

        match (projection, view.units, view.resolution, view.center) {
            (Some(projection), Some(units), Some(resolution), Some(center)) => Ok(Self {
                projection,
                units,
                resolution,
                center,
            }),
            _ => {
                let mut missing = Vec::new();
                if projection.is_none() {
                    missing.push("projection");
                }
                if view.units.is_none() {
                    missing.push("units");
                }
                if view.resolution.is_none() {
                    missing.push("resolution");
                }
                if view.center.is_none() {
                    missing.push("center");
                }
                Err(PrintError::IncompleteViewState { missing })
            }
        }
    }
}

/// Builds print specifications from map snapshots.
pub struct SpecAssembler {
    config: PrintConfig,
    styles: Arc<dyn StyleTranslator>,
}

impl SpecAssembler {
    pub fn new(config: PrintConfig, styles: Arc<dyn StyleTranslator>) -> Self {
        Self { config, styles }
    }

    /// Build the print specification for `map`.
    ///
    /// The view is validated before any layer is looked at. Layers are then
    /// translated concurrently; if any translation fails the whole build
    /// fails with [`PrintError::SpecBuildFailed`] and no spec is produced.
    /// Layers with unrecognized sources are left out, the rest keep their
    /// relative order.
    #[instrument(skip_all, fields(layers = map.layers.len()))]
    pub async fn build_spec(&self, map: &MapState) -> PrintResult<SpecBuild> {
        let view = RequiredView::from_view(&map.view).map_err(|e| {
            error!(error = %e, "Cannot build print specification");
            e
        })?;

        let scale = compute_scale(view.resolution, view.units);
        let center = center_to_lon_lat(view.projection, view.center).map_err(|e| {
            error!(error = %e, "Cannot reproject map center");
            e
        })?;

        let translator = LayerTranslator::new(&self.config, self.styles.as_ref());
        let translated = try_join_all(map.layers.iter().map(|layer| translator.translate(layer)))
            .await
            .map_err(|e| {
                error!(error = %e, "Layer translation failed, aborting print specification");
                PrintError::spec_build_failed(e)
            })?;

        let mut layers = Vec::with_capacity(translated.len());
        let mut diagnostics = Vec::new();
        for (index, result) in translated.into_iter().enumerate() {
            if let Some(result) = result {
                diagnostics.extend(result.diagnostics.into_iter().map(|d| d.for_layer(index)));
                layers.push(result.descriptor);
            }
        }

        info!(
            printed = layers.len(),
            skipped = map.layers.len() - layers.len(),
            scale,
            projection = view.projection,
            "Built print specification"
        );

        let spec = PrintSpec {
            layers,
            size: self.config.page.clone(),
            center,
            dpi: self.config.dpi,
            scale,
            projection: view.projection.to_string(),
            scale_bar: self.config.scale_bar.clone(),
            north_arrow: self.config.north_arrow,
            attributions: self.config.attributions,
        };

        Ok(SpecBuild { spec, diagnostics })
    }
}

impl Default for SpecAssembler {
    fn default() -> Self {
        Self::new(PrintConfig::default(), Arc::new(PassthroughStyleTranslator))
    }
}
