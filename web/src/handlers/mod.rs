//! HTTP request handlers, one module per capability contract.
//!
//! Each module exposes its handlers plus a `routes` function producing the
//! capability's [`RouteGroup`]. The gateway merges the groups of the
//! providers that are present; a group is never built for an absent one.

pub mod edit;
pub mod notify;
pub mod preview;
pub mod user;
pub mod version;
pub mod watermark;

use crate::extractors::Referer;
use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    handler::Handler,
    http::Method,
    routing::{get, post, put},
};
use std::fmt;
use std::sync::Arc;

/// Handler state of one capability: its provider plus the gateway referer.
pub struct CapabilityState<P: ?Sized> {
    /// The embedder-supplied provider.
    pub provider: Arc<P>,
    /// Referer copied into every request context.
    pub referer: Referer,
}

impl<P: ?Sized> CapabilityState<P> {
    /// Bundle a provider with the gateway referer.
    #[must_use]
    pub const fn new(provider: Arc<P>, referer: Referer) -> Self {
        Self { provider, referer }
    }
}

impl<P: ?Sized> Clone for CapabilityState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            referer: self.referer.clone(),
        }
    }
}

impl<P: ?Sized> FromRef<CapabilityState<P>> for Referer {
    fn from_ref(state: &CapabilityState<P>) -> Self {
        state.referer.clone()
    }
}

/// HTTP methods used by the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl RouteMethod {
    /// The corresponding [`Method`].
    #[must_use]
    pub const fn as_method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_method().as_str())
    }
}

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteSpec {
    /// HTTP method.
    pub method: RouteMethod,
    /// Full path, prefix included, in router syntax (`:file_id`).
    pub path: String,
}

impl RouteSpec {
    pub(crate) fn prefixed(self, prefix: &str) -> Self {
        Self {
            method: self.method,
            path: format!("{prefix}{}", self.path),
        }
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Routes of one or more capabilities, with the table describing them.
pub(crate) struct RouteGroup<S = ()> {
    router: Router<S>,
    specs: Vec<RouteSpec>,
}

impl<S> RouteGroup<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(crate) fn new() -> Self {
        Self {
            router: Router::new(),
            specs: Vec::new(),
        }
    }

    pub(crate) fn route<H, T>(mut self, method: RouteMethod, path: &'static str, handler: H) -> Self
    where
        H: Handler<T, S>,
        T: 'static,
    {
        let method_router = match method {
            RouteMethod::Get => get(handler),
            RouteMethod::Post => post(handler),
            RouteMethod::Put => put(handler),
        };
        self.router = self.router.route(path, method_router);
        self.specs.push(RouteSpec {
            method,
            path: path.to_string(),
        });
        self
    }

    pub(crate) fn with_state(self, state: S) -> RouteGroup {
        RouteGroup {
            router: self.router.with_state(state),
            specs: self.specs,
        }
    }
}

impl RouteGroup {
    pub(crate) fn merge(mut self, other: Self) -> Self {
        self.router = self.router.merge(other.router);
        self.specs.extend(other.specs);
        self
    }

    /// Apply a body size limit to every route of the group.
    pub(crate) fn body_limit(mut self, limit: DefaultBodyLimit) -> Self {
        self.router = self.router.layer(limit);
        self
    }

    pub(crate) fn into_parts(self) -> (Router, Vec<RouteSpec>) {
        (self.router, self.specs)
    }
}
