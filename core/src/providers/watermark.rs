//! Watermark contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::Watermark;
use async_trait::async_trait;

/// Supplies watermark rendering parameters.
#[async_trait]
pub trait WatermarkProvider: Send + Sync {
    /// Get the watermark for a file.
    ///
    /// # Errors
    ///
    /// `FileNotExists` when the id is unknown.
    async fn get_file_watermark(&self, ctx: &Context, file_id: &str) -> Result<Watermark>;
}
