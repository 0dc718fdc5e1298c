//! HTTP gateway for WebOffice third-party integrations.
//!
//! The WebOffice service calls back into the integrating system over a
//! fixed set of routes. This crate exposes those routes with Axum and
//! forwards each call to a capability provider from `weboffice-core`.
//!
//! # Request Flow
//!
//! 1. **Extract context** from the `X-*` headers; no token means `401`
//! 2. **Parse parameters** from path, query, JSON or multipart body
//! 3. **Dispatch** to the capability's provider
//! 4. **Reply** with `{"code": 0, "data": ...}` or the failure envelope
//!
//! # Example
//!
//! ```ignore
//! use weboffice_web::{Gateway, GatewayConfig, Providers};
//!
//! let drive = Arc::new(MyDrive::default());
//! let gateway = Gateway::new(
//!     GatewayConfig::new().with_prefix("/weboffice"),
//!     Providers::new().with_preview(drive.clone()).with_edit(drive),
//! )?;
//!
//! let app = Router::new().merge(gateway.router());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod middleware;
mod params;
pub mod reply;
mod upload;

pub use config::{ConfigError, DEFAULT_REFERER, GatewayConfig, Providers};
pub use error::ApiError;
pub use extractors::{
    APP_ID_HEADER, REQUEST_ID_HEADER, Referer, RequestContext, TOKEN_HEADER, USER_QUERY_HEADER,
};
pub use gateway::Gateway;
pub use handlers::{RouteMethod, RouteSpec};
pub use reply::{ApiResult, Envelope, Reply};
