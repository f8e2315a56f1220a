//! Outbound seam to the print service.

use async_trait::async_trait;
use bytes::Bytes;
use print_common::PrintResult;

use crate::PrintSpec;

/// Renders a print specification into an image.
#[async_trait]
pub trait PrintService: Send + Sync {
    /// Render `spec`, returning the encoded image bytes.
    async fn print(&self, spec: &PrintSpec) -> PrintResult<Bytes>;
}
