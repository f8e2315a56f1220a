//! Print specification builder.
//!
//! Turns a [`MapState`](print_common::MapState) into a [`PrintSpec`]: the
//! declarative document a print service renders into a static image.
//!
//! - [`scale`] derives the scale denominator from the view resolution
//! - [`translate`] maps each layer source onto a normalized descriptor
//! - [`assemble`] validates the view and puts the document together

pub mod assemble;
pub mod config;
pub mod descriptor;
pub mod scale;
pub mod service;
pub mod translate;

pub use assemble::{SpecAssembler, SpecBuild};
pub use config::{BasemapConfig, PageSize, PrintConfig, ScaleBarConfig};
pub use descriptor::{
    Diagnostic, DiagnosticKind, GeoJsonLayer, LayerDescriptor, PrintSpec, ScaleBar, WmsLayer,
    WmtsLayer, WmtsTileGrid, XyzLayer,
};
pub use scale::compute_scale;
pub use service::PrintService;
pub use translate::{LayerTranslator, TranslatedLayer};
