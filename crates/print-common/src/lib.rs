//! Common types shared across the map print workspace.
//!
//! Holds the read-only map model handed in by the interactive map, the
//! unit and projection helpers used for scale and center computation, and
//! the error type every crate reports through.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod geojson;
pub mod map;
pub mod style;
pub mod tile;
pub mod units;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use error::{PrintError, PrintResult};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use map::{
    ImageWmsSource, LayerSource, MapLayer, MapState, OsmSource, TileWmsSource, VectorSource,
    ViewState, WmtsRequestEncoding, WmtsSource,
};
pub use style::{
    LayerStyle, PassthroughStyleTranslator, StyleTranslation, StyleTranslationError,
    StyleTranslator,
};
pub use tile::TileGrid;
pub use units::Units;
