//! Preview contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::{DownloadInfo, FileInfo, FilePermission};
use async_trait::async_trait;

/// File metadata, download and permission lookups. Mandatory.
#[async_trait]
pub trait PreviewProvider: Send + Sync {
    /// Get file metadata.
    ///
    /// # Errors
    ///
    /// `FileNotExists` when the id is unknown; `PermissionDenied` when the
    /// caller may not see the file.
    async fn get_file(&self, ctx: &Context, file_id: &str) -> Result<FileInfo>;

    /// Get a time-limited download location for the current version.
    ///
    /// # Errors
    ///
    /// `FileNotExists` when the id is unknown.
    async fn get_file_download(&self, ctx: &Context, file_id: &str) -> Result<DownloadInfo>;

    /// Get the caller's permission flags on the file.
    ///
    /// # Errors
    ///
    /// `FileNotExists` when the id is unknown.
    async fn get_file_permission(&self, ctx: &Context, file_id: &str) -> Result<FilePermission>;
}
