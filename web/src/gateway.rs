//! The assembled gateway: route table, middleware and server.
//!
//! Routes are registered once, at construction, from the providers that
//! are present. The preview routes are always registered; every other
//! capability contributes its routes only when its provider was supplied,
//! so requests to an absent capability answer `404 Not Found`.

use crate::config::{ConfigError, GatewayConfig, Providers};
use crate::extractors::Referer;
use crate::handlers::{
    CapabilityState, RouteGroup, RouteSpec, edit, notify, preview, user, version, watermark,
};
use crate::middleware::{handle_panic, log_request};
use axum::{Router, middleware::from_fn};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{debug, info};

/// HTTP gateway dispatching WebOffice callbacks to the providers.
///
/// # Example
///
/// ```ignore
/// let gateway = Gateway::new(GatewayConfig::new(), Providers::new().with_preview(drive))?;
/// let listener = TcpListener::bind("0.0.0.0:8080").await?;
/// gateway.serve(listener, shutdown_signal()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Gateway {
    config: GatewayConfig,
    routes: Vec<RouteSpec>,
    router: Router,
}

impl Gateway {
    /// Build the gateway.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingPreviewProvider`] without a preview provider
    /// - [`ConfigError::InvalidPrefix`] for a prefix not starting with `/`
    pub fn new(config: GatewayConfig, providers: Providers) -> Result<Self, ConfigError> {
        let prefix = config.normalized_prefix()?;
        let preview = providers
            .preview
            .clone()
            .ok_or(ConfigError::MissingPreviewProvider)?;
        let referer = Referer(Arc::from(config.referer.as_str()));

        let optional = [
            (
                "user",
                providers
                    .user
                    .map(|provider| user::routes(CapabilityState::new(provider, referer.clone()))),
            ),
            (
                "watermark",
                providers.watermark.map(|provider| {
                    watermark::routes(CapabilityState::new(provider, referer.clone()))
                }),
            ),
            (
                "edit",
                providers.edit.map(|provider| {
                    edit::routes(
                        CapabilityState::new(provider, referer.clone()),
                        config.max_upload_size,
                    )
                }),
            ),
            (
                "version",
                providers.version.map(|provider| {
                    version::routes(CapabilityState::new(provider, referer.clone()))
                }),
            ),
            (
                "notify",
                providers
                    .notify
                    .map(|provider| notify::routes(CapabilityState::new(provider, referer.clone()))),
            ),
        ];

        let mut table: RouteGroup = preview::routes(CapabilityState::new(preview, referer.clone()));
        for (capability, group) in optional {
            match group {
                Some(group) => table = table.merge(group),
                None => debug!(capability, "no provider, routes not registered"),
            }
        }

        let (router, specs) = table.into_parts();
        let router = router.layer(
            ServiceBuilder::new()
                .layer(from_fn(log_request))
                .layer(CatchPanicLayer::custom(handle_panic)),
        );
        let router = if prefix.is_empty() {
            router
        } else {
            Router::new().nest(&prefix, router)
        };

        let routes: Vec<RouteSpec> = specs
            .into_iter()
            .map(|spec| spec.prefixed(&prefix))
            .collect();
        for route in &routes {
            debug!(%route, "route registered");
        }
        info!(prefix = %prefix, routes = routes.len(), "gateway routes registered");

        Ok(Self {
            config,
            routes,
            router,
        })
    }

    /// Configuration the gateway was built with.
    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Registered routes, prefix included.
    #[must_use]
    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    /// A router to mount into an existing application.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Consume the gateway into its router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that stopped the server.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(%addr, "WebOffice gateway listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("WebOffice gateway stopped");
        Ok(())
    }
}
