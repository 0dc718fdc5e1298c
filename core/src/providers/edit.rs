//! Edit contract.

use crate::context::Context;
use crate::error::Result;
use crate::types::{FileInfo, RenameFileArgs};
use crate::upload::UpdateFileArgs;
use async_trait::async_trait;

/// Saves new content and renames files.
#[async_trait]
pub trait EditProvider: Send + Sync {
    /// Store new content for a file and return the refreshed metadata.
    ///
    /// `args.content` is borrowed: the gateway closes it after this call
    /// returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// `SpaceFull`, `PermissionDenied`, `FileNotExists`, or `InternalError`
    /// when the content cannot be read.
    async fn update_file(
        &self,
        ctx: &Context,
        file_id: &str,
        args: &mut UpdateFileArgs,
    ) -> Result<FileInfo>;

    /// Rename a file.
    ///
    /// # Errors
    ///
    /// `FileNameConflict` when the name is taken.
    async fn rename_file(&self, ctx: &Context, file_id: &str, args: &RenameFileArgs) -> Result<()>;
}
