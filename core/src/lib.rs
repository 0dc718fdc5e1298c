//! # WebOffice Core
//!
//! Shared vocabulary for the WebOffice third-party callback gateway.
//!
//! The document-preview client calls a fixed REST surface; every call is
//! answered by a *capability provider* supplied by the embedding application.
//! This crate defines everything both sides of that seam agree on:
//!
//! - [`error`]: the closed wire error taxonomy (`ProviderError`)
//! - [`context`]: the per-request execution context handed to every provider
//! - [`types`]: the JSON data shapes exchanged with the client
//! - [`upload`]: the binary content stream of an upload
//! - [`providers`]: the six capability contracts
//!
//! The HTTP side lives in `weboffice-web`.
//!
//! ## Example
//!
//! ```ignore
//! use weboffice_core::{Context, FileInfo, ProviderError, PreviewProvider};
//!
//! struct Drive;
//!
//! #[async_trait::async_trait]
//! impl PreviewProvider for Drive {
//!     async fn get_file(&self, _ctx: &Context, file_id: &str) -> weboffice_core::Result<FileInfo> {
//!         if file_id != "f1" {
//!             return Err(ProviderError::FILE_NOT_EXISTS);
//!         }
//!         Ok(FileInfo::new("f1", "doc", 1))
//!     }
//!     // ...
//! }
//! ```

pub mod context;
pub mod error;
pub mod providers;
pub mod types;
pub mod upload;

pub use context::{Context, QueryParams, QueryParseError, parse_query};
pub use error::{ErrorKind, OK_CODE, ProviderError, Result};
pub use providers::{
    EditProvider, NotifyProvider, PreviewProvider, UserProvider, VersionProvider,
    WatermarkProvider,
};
pub use types::{
    DownloadInfo, Empty, FileInfo, FilePermission, NotifyArgs, NotifyContent, RenameFileArgs,
    UserInfo, Watermark,
};
pub use upload::{UpdateFileArgs, UploadSource, UploadStream};
