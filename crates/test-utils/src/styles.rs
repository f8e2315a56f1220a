//! Style translators with scripted behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use print_common::{StyleTranslation, StyleTranslationError, StyleTranslator};
use serde_json::Value;
use tokio::sync::Barrier;

fn strings(style: &Value, key: &str) -> Vec<String> {
    style
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Translator driven by keys in the native style:
///
/// - `"fail": "<message>"` rejects the translation
/// - `"delay_ms": n` sleeps before answering
/// - `"errors"`, `"warnings"`, `"unsupported"` arrays are reported back
/// - `"output"` is returned as the translated style (absent if missing)
#[derive(Debug, Default)]
pub struct ScriptedStyleTranslator {
    calls: AtomicUsize,
}

impl ScriptedStyleTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of translations requested so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StyleTranslator for ScriptedStyleTranslator {
    async fn translate(&self, style: &Value) -> Result<StyleTranslation, StyleTranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(ms) = style.get("delay_ms").and_then(Value::as_u64) {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }

        if let Some(message) = style.get("fail").and_then(Value::as_str) {
            return Err(StyleTranslationError(message.to_string()));
        }

        Ok(StyleTranslation {
            output: style.get("output").cloned(),
            errors: strings(style, "errors"),
            warnings: strings(style, "warnings"),
            unsupported_properties: strings(style, "unsupported"),
        })
    }
}

/// Translator that only answers once `parties` translations are in flight
/// at the same time.
#[derive(Debug, Clone)]
pub struct BarrierStyleTranslator {
    barrier: Arc<Barrier>,
}

impl BarrierStyleTranslator {
    pub fn new(parties: usize) -> Self {
        Self {
            barrier: Arc::new(Barrier::new(parties)),
        }
    }
}

#[async_trait]
impl StyleTranslator for BarrierStyleTranslator {
    async fn translate(&self, style: &Value) -> Result<StyleTranslation, StyleTranslationError> {
        self.barrier.wait().await;
        Ok(StyleTranslation::output(style.clone()))
    }
}
