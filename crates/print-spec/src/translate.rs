//! Layer translation.
//!
//! Maps each [`LayerSource`] variant onto a normalized [`LayerDescriptor`].
//! Only vector layers suspend, while their style is being translated.

use print_common::map::{wms_layers_param, ImageWmsSource, OsmSource, TileWmsSource, WmtsSource};
use print_common::{
    FeatureCollection, LayerSource, LayerStyle, MapLayer, PrintError, PrintResult,
    StyleTranslator, VectorSource,
};
use tracing::{debug, error};

use crate::descriptor::{
    Diagnostic, DiagnosticKind, GeoJsonLayer, LayerDescriptor, WmsLayer, WmtsLayer,
    WmtsTileGrid, XyzLayer,
};
use crate::PrintConfig;

/// A descriptor plus the findings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedLayer {
    pub descriptor: LayerDescriptor,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslatedLayer {
    fn new(descriptor: LayerDescriptor) -> Self {
        Self {
            descriptor,
            diagnostics: Vec::new(),
        }
    }
}

/// Translates map layers into print descriptors.
pub struct LayerTranslator<'a> {
    config: &'a PrintConfig,
    styles: &'a dyn StyleTranslator,
}

impl<'a> LayerTranslator<'a> {
    pub fn new(config: &'a PrintConfig, styles: &'a dyn StyleTranslator) -> Self {
        Self { config, styles }
    }

    /// Translate one layer.
    ///
    /// Returns `Ok(None)` for sources without a print representation. The
    /// only failure is a rejected style translation.
    pub async fn translate(&self, layer: &MapLayer) -> PrintResult<Option<TranslatedLayer>> {
        let translated = match &layer.source {
            LayerSource::TileWms(source) => self.tile_wms(layer, source),
            LayerSource::ImageWms(source) => self.image_wms(layer, source),
            LayerSource::Wmts(source) => self.wmts(layer, source),
            LayerSource::Osm(source) => self.basemap(layer, source),
            LayerSource::Vector(source) => self.vector(layer, source).await?,
            LayerSource::Unrecognized => {
                debug!(
                    layer = layer.name.as_deref().unwrap_or(""),
                    "Skipping layer with unrecognized source"
                );
                return Ok(None);
            }
        };

        Ok(Some(translated))
    }

    fn attribution(&self, attributions: &[String]) -> String {
        if self.config.propagate_attributions {
            attributions.join(", ")
        } else {
            String::new()
        }
    }

    fn tile_wms(&self, layer: &MapLayer, source: &TileWmsSource) -> TranslatedLayer {
        TranslatedLayer::new(LayerDescriptor::Wms(WmsLayer {
            url: source.urls.first().cloned().unwrap_or_default(),
            opacity: layer.opacity,
            attribution: self.attribution(&source.attributions),
            layer: wms_layers_param(&source.params),
            tiled: true,
        }))
    }

    fn image_wms(&self, layer: &MapLayer, source: &ImageWmsSource) -> TranslatedLayer {
        TranslatedLayer::new(LayerDescriptor::Wms(WmsLayer {
            url: source.url.clone().unwrap_or_default(),
            opacity: layer.opacity,
            attribution: self.attribution(&source.attributions),
            layer: wms_layers_param(&source.params),
            tiled: false,
        }))
    }

    fn wmts(&self, layer: &MapLayer, source: &WmtsSource) -> TranslatedLayer {
        let grid = &source.tile_grid;
        let mut diagnostics = Vec::new();

        // The print service addresses tile matrices by index.
        if !grid.has_contiguous_matrix_ids() {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::NonContiguousMatrixIds,
                format!(
                    "WMTS layer {} uses matrix ids {:?}; printing with 0..{}",
                    source.layer,
                    grid.matrix_ids,
                    grid.resolutions.len()
                ),
            ));
        }

        let descriptor = LayerDescriptor::Wmts(WmtsLayer {
            request_encoding: source.request_encoding,
            url: source.urls.first().cloned().unwrap_or_default(),
            layer: source.layer.clone(),
            projection: source.projection.clone(),
            matrix_set: source.matrix_set.clone(),
            tile_grid: WmtsTileGrid {
                resolutions: grid.resolutions.clone(),
                extent: grid.extent,
                matrix_ids: grid.matrix_indices(),
            },
            format: source.format.clone(),
            opacity: layer.opacity,
            attribution: self.attribution(&source.attributions),
        });

        TranslatedLayer {
            descriptor,
            diagnostics,
        }
    }

    /// The basemap always prints from the configured template; whatever url
    /// the source carries is ignored.
    fn basemap(&self, layer: &MapLayer, _source: &OsmSource) -> TranslatedLayer {
        TranslatedLayer::new(LayerDescriptor::Xyz(XyzLayer {
            url: self.config.basemap.url.clone(),
            opacity: layer.opacity,
            attribution: self.config.basemap.attribution.clone(),
            tiled: true,
        }))
    }

    async fn vector(
        &self,
        layer: &MapLayer,
        source: &VectorSource,
    ) -> PrintResult<TranslatedLayer> {
        let geojson = FeatureCollection::new().with_features(source.features.iter().cloned());
        let mut diagnostics = Vec::new();

        let style = match &layer.style {
            None => None,
            Some(LayerStyle::PerFeature { function }) => {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::PerFeatureStyleIgnored,
                    format!(
                        "per-feature style {} cannot be printed, layer printed unstyled",
                        function.as_deref().unwrap_or("<anonymous>")
                    ),
                ));
                None
            }
            Some(LayerStyle::Static { definition }) => {
                let translation = self.styles.translate(definition).await.map_err(|e| {
                    error!(
                        layer = layer.name.as_deref().unwrap_or(""),
                        error = %e,
                        "Style translation rejected"
                    );
                    PrintError::from(e)
                })?;

                let findings = [
                    (DiagnosticKind::StyleError, translation.errors),
                    (DiagnosticKind::StyleWarning, translation.warnings),
                    (
                        DiagnosticKind::UnsupportedStyleProperty,
                        translation.unsupported_properties,
                    ),
                ];
                for (kind, messages) in findings {
                    diagnostics.extend(messages.into_iter().map(|m| Diagnostic::new(kind, m)));
                }

                translation.output
            }
        };

        Ok(TranslatedLayer {
            descriptor: LayerDescriptor::GeoJson(GeoJsonLayer {
                geojson,
                style,
                attribution: String::new(),
            }),
            diagnostics,
        })
    }
}
