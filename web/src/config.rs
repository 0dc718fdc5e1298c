//! Gateway configuration and provider registration.
//!
//! [`GatewayConfig`] holds the deployment settings (route prefix, referer);
//! [`Providers`] holds the embedder's capability implementations. Only the
//! preview provider is mandatory.
//!
//! # Example
//!
//! ```ignore
//! let drive = Arc::new(MyDrive::new());
//!
//! let config = GatewayConfig::from_env().with_prefix("/weboffice");
//! let providers = Providers::new()
//!     .with_preview(drive.clone())
//!     .with_edit(drive);
//!
//! let gateway = Gateway::new(config, providers)?;
//! ```

use std::env;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use weboffice_core::{
    EditProvider, NotifyProvider, PreviewProvider, UserProvider, VersionProvider, WatermarkProvider,
};

/// Referer used when none is configured.
pub const DEFAULT_REFERER: &str = "https://solution.wps.cn";

/// Environment variable for the route prefix.
pub const PREFIX_ENV: &str = "WEBOFFICE_PREFIX";

/// Environment variable for the referer.
pub const REFERER_ENV: &str = "WEBOFFICE_REFERER";

/// Environment variable for the upload size limit in bytes.
pub const MAX_UPLOAD_SIZE_ENV: &str = "WEBOFFICE_MAX_UPLOAD_SIZE";

/// Configuration errors, reported when the gateway is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No preview provider was registered.
    #[error("preview provider is required")]
    MissingPreviewProvider,

    /// The route prefix does not start with `/`.
    #[error("route prefix must start with '/': {0:?}")]
    InvalidPrefix(String),
}

/// Deployment settings of the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Path prefix for every route, e.g. `/weboffice`. Empty mounts at root.
    pub prefix: String,
    /// Referer copied into every request context.
    pub referer: String,
    /// Body size limit of the upload route in bytes; `None` is unlimited.
    pub max_upload_size: Option<usize>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            referer: DEFAULT_REFERER.to_string(),
            max_upload_size: None,
        }
    }
}

impl GatewayConfig {
    /// Root-mounted gateway with the default referer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `WEBOFFICE_PREFIX`, `WEBOFFICE_REFERER` and
    /// `WEBOFFICE_MAX_UPLOAD_SIZE`, with defaults.
    ///
    /// An unparsable upload size leaves uploads unlimited.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            prefix: env::var(PREFIX_ENV).unwrap_or_default(),
            referer: env::var(REFERER_ENV).unwrap_or_else(|_| DEFAULT_REFERER.to_string()),
            max_upload_size: env::var(MAX_UPLOAD_SIZE_ENV)
                .ok()
                .and_then(|size| size.trim().parse().ok()),
        }
    }

    /// Set the route prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the referer.
    #[must_use]
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    /// Cap the upload route's body at `bytes`.
    #[must_use]
    pub const fn with_max_upload_size(mut self, bytes: usize) -> Self {
        self.max_upload_size = Some(bytes);
        self
    }

    /// The prefix without its trailing `/`; `""` for the root.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidPrefix`] when a non-empty prefix lacks the
    /// leading `/`.
    pub fn normalized_prefix(&self) -> Result<String, ConfigError> {
        let prefix = self.prefix.trim();
        if prefix.is_empty() {
            return Ok(String::new());
        }
        if !prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(self.prefix.clone()));
        }
        Ok(prefix.trim_end_matches('/').to_string())
    }
}

/// Capability providers supplied by the embedder.
///
/// A capability whose provider is `None` gets no routes at all.
#[derive(Clone, Default)]
pub struct Providers {
    /// File metadata, download and permission. Required.
    pub preview: Option<Arc<dyn PreviewProvider>>,
    /// User profile lookup.
    pub user: Option<Arc<dyn UserProvider>>,
    /// Watermark parameters.
    pub watermark: Option<Arc<dyn WatermarkProvider>>,
    /// Content upload and rename.
    pub edit: Option<Arc<dyn EditProvider>>,
    /// Version history.
    pub version: Option<Arc<dyn VersionProvider>>,
    /// Event notifications.
    pub notify: Option<Arc<dyn NotifyProvider>>,
}

impl Providers {
    /// No providers registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the preview provider.
    #[must_use]
    pub fn with_preview<P: PreviewProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.preview = Some(provider);
        self
    }

    /// Register the user provider.
    #[must_use]
    pub fn with_user<P: UserProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.user = Some(provider);
        self
    }

    /// Register the watermark provider.
    #[must_use]
    pub fn with_watermark<P: WatermarkProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.watermark = Some(provider);
        self
    }

    /// Register the edit provider.
    #[must_use]
    pub fn with_edit<P: EditProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.edit = Some(provider);
        self
    }

    /// Register the version provider.
    #[must_use]
    pub fn with_version<P: VersionProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.version = Some(provider);
        self
    }

    /// Register the notify provider.
    #[must_use]
    pub fn with_notify<P: NotifyProvider + 'static>(mut self, provider: Arc<P>) -> Self {
        self.notify = Some(provider);
        self
    }
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Providers")
            .field("preview", &self.preview.is_some())
            .field("user", &self.user.is_some())
            .field("watermark", &self.watermark.is_some())
            .field("edit", &self.edit.is_some())
            .field("version", &self.version.is_some())
            .field("notify", &self.notify.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::new();
        assert_eq!(config.prefix, "");
        assert_eq!(config.referer, "https://solution.wps.cn");
        assert_eq!(config.normalized_prefix().unwrap(), "");
        assert_eq!(config.max_upload_size, None);
    }

    #[test]
    fn test_prefix_normalization() {
        let config = GatewayConfig::new().with_prefix("/weboffice/");
        assert_eq!(config.normalized_prefix().unwrap(), "/weboffice");

        let config = GatewayConfig::new().with_prefix("/");
        assert_eq!(config.normalized_prefix().unwrap(), "");
    }

    #[test]
    fn test_prefix_without_slash_is_rejected() {
        let config = GatewayConfig::new().with_prefix("weboffice");
        assert_eq!(
            config.normalized_prefix(),
            Err(ConfigError::InvalidPrefix("weboffice".to_string()))
        );
    }

    #[test]
    fn test_builders() {
        let config = GatewayConfig::new()
            .with_prefix("/office")
            .with_referer("https://example.test")
            .with_max_upload_size(64 * 1024 * 1024);
        assert_eq!(config.max_upload_size, Some(64 * 1024 * 1024));
        assert_eq!(config.prefix, "/office");
        assert_eq!(config.referer, "https://example.test");
    }

    #[test]
    fn test_providers_debug_shows_presence() {
        let providers = Providers::new();
        let rendered = format!("{providers:?}");
        assert!(rendered.contains("preview: false"));
        assert!(providers.notify.is_none());
    }
}
