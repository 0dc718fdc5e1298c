//! Execution context derivation.
//!
//! [`RequestContext`] builds the provider-facing [`Context`] from the
//! request headers:
//!
//! | Header              | Field                          |
//! |---------------------|--------------------------------|
//! | `X-App-ID`          | `app_id`                       |
//! | `X-WebOffice-Token` | `token` (required)             |
//! | `X-Request-ID`      | `request_id`                   |
//! | `X-User-Query`      | `query` (URL-encoded pairs)    |
//!
//! A request without a token is rejected with `Unauthorized` before the
//! handler body runs. A malformed `X-User-Query` yields an empty parameter
//! set instead of failing the request.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use std::sync::Arc;
use weboffice_core::{Context, ProviderError, QueryParams, parse_query};

/// Calling application id.
pub const APP_ID_HEADER: &str = "X-App-ID";

/// Bearer token issued by the WebOffice service.
pub const TOKEN_HEADER: &str = "X-WebOffice-Token";

/// Request trace id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Extra parameters the embedder passed through the client, URL-encoded.
pub const USER_QUERY_HEADER: &str = "X-User-Query";

/// Referer configured on the gateway, copied into every context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Referer(pub Arc<str>);

/// Extracted execution context.
///
/// # Example
///
/// ```ignore
/// async fn handler(RequestContext(ctx): RequestContext) -> String {
///     format!("app {} request {}", ctx.app_id(), ctx.request_id())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext(pub Context);

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
    Referer: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let referer = Referer::from_ref(state);
        derive_context(&parts.headers, &referer.0).map(Self)
    }
}

/// Build a [`Context`] from request headers.
///
/// # Errors
///
/// `Unauthorized` when the token header is missing or empty.
pub fn derive_context(headers: &HeaderMap, referer: &str) -> Result<Context, ApiError> {
    let token = header_text(headers, TOKEN_HEADER);
    if token.is_empty() {
        return Err(ProviderError::UNAUTHORIZED.with_message("token is empty").into());
    }

    Ok(Context::new(token)
        .with_app_id(header_text(headers, APP_ID_HEADER))
        .with_request_id(header_text(headers, REQUEST_ID_HEADER))
        .with_query(user_query(headers))
        .with_referer(referer))
}

/// Header value decoded lossily, so opaque bytes outside visible ASCII
/// still reach the provider. Empty when absent.
fn header_text(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default()
}

/// Header value as text; empty when absent or not visible ASCII.
pub(crate) fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn user_query(headers: &HeaderMap) -> QueryParams {
    let raw = header_value(headers, USER_QUERY_HEADER);
    parse_query(raw).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "ignoring malformed user query");
        QueryParams::new()
    })
}
