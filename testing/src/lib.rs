//! # WebOffice Testing
//!
//! In-memory capability providers for exercising a gateway without a real
//! storage backend.
//!
//! [`MockDrive`] implements all six provider contracts over one shared
//! file store. It records every call, the contexts it was handed and the
//! side effects of uploads, renames and notifications, and it can be told
//! to fail every call with a chosen error.
//!
//! ## Example
//!
//! ```ignore
//! use weboffice_testing::MockDrive;
//! use weboffice_core::{FileInfo, ProviderError};
//!
//! let drive = Arc::new(MockDrive::new().with_file(FileInfo::new("f1", "a.docx", 1)));
//! let gateway = Gateway::new(GatewayConfig::new(), Providers::new().with_preview(drive.clone()))?;
//!
//! drive.fail_with(ProviderError::PERMISSION_DENIED);
//! // ... every provider call now answers 40003
//! assert_eq!(drive.call_count(), 0);
//! ```

pub mod drive;

pub use drive::{MockDrive, RecordedRename, RecordedUpload};
