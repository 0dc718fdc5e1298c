//! Version history contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::{DownloadInfo, FileInfo};
use async_trait::async_trait;

/// Lists and fetches historical versions.
#[async_trait]
pub trait VersionProvider: Send + Sync {
    /// List version metadata, `limit` entries starting at `offset`.
    ///
    /// # Errors
    ///
    /// `FileNotExists` when the id is unknown.
    async fn get_file_versions(
        &self,
        ctx: &Context,
        file_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FileInfo>>;

    /// Get the metadata of one version.
    ///
    /// # Errors
    ///
    /// `FileVersionNotExists` when the version is unknown.
    async fn get_file_version(&self, ctx: &Context, file_id: &str, version: i32) -> Result<FileInfo>;

    /// Get a download location for one version.
    ///
    /// # Errors
    ///
    /// `FileVersionNotExists` when the version is unknown.
    async fn get_file_version_download(
        &self,
        ctx: &Context,
        file_id: &str,
        version: i32,
    ) -> Result<DownloadInfo>;
}
