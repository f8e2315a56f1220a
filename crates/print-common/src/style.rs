//! Vector layer styles and the style translation seam.
//!
//! Native layer styles are opaque to this workspace. Turning them into the
//! print service's style dialect is delegated to a [`StyleTranslator`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::PrintError;

/// Style attached to a vector layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerStyle {
    /// One style applied uniformly to every feature
    Static { definition: Value },

    /// Style evaluated per feature; not printable
    PerFeature {
        #[serde(default)]
        function: Option<String>,
    },
}

impl LayerStyle {
    pub fn uniform(definition: Value) -> Self {
        LayerStyle::Static { definition }
    }
}

/// Result of translating one native style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTranslation {
    /// Translated style, absent when nothing could be translated
    #[serde(default)]
    pub output: Option<Value>,

    #[serde(default)]
    pub errors: Vec<String>,

    #[serde(default)]
    pub warnings: Vec<String>,

    /// Native properties the target dialect cannot express
    #[serde(default)]
    pub unsupported_properties: Vec<String>,
}

impl StyleTranslation {
    pub fn output(output: Value) -> Self {
        Self {
            output: Some(output),
            ..Default::default()
        }
    }
}

/// The style translator rejected the request outright.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StyleTranslationError(pub String);

impl From<StyleTranslationError> for PrintError {
    fn from(err: StyleTranslationError) -> Self {
        PrintError::StyleTranslation(err.0)
    }
}

/// Translates a native layer style into the print service's dialect.
#[async_trait]
pub trait StyleTranslator: Send + Sync {
    async fn translate(&self, style: &Value) -> Result<StyleTranslation, StyleTranslationError>;
}

/// Hands the native style through unchanged.
///
/// Suitable when the map already stores styles in the print service's
/// dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughStyleTranslator;

#[async_trait]
impl StyleTranslator for PassthroughStyleTranslator {
    async fn translate(&self, style: &Value) -> Result<StyleTranslation, StyleTranslationError> {
        Ok(StyleTranslation::output(style.clone()))
    }
}
