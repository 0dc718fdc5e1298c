//! Request logging and panic containment for gateway routes.
//!
//! - [`log_request`] emits exactly one event per request with the method,
//!   path, wire code and elapsed time, inside an `http_request` span.
//! - [`handle_panic`] turns a panicking handler or provider into the
//!   `InternalError` envelope instead of dropping the connection.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware::from_fn};
//! use tower::ServiceBuilder;
//! use tower_http::catch_panic::CatchPanicLayer;
//!
//! let app = Router::new()
//!     .route("/v3/3rd/files/:file_id", get(get_file))
//!     .layer(
//!         ServiceBuilder::new()
//!             .layer(from_fn(log_request))
//!             .layer(CatchPanicLayer::custom(handle_panic)),
//!     );
//! ```

use crate::error::ApiError;
use crate::extractors::{REQUEST_ID_HEADER, header_value};
use crate::reply::ReplyOutcome;
use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::time::Instant;
use tracing::{Instrument, error, info, warn};
use weboffice_core::{OK_CODE, ProviderError};

/// Log one line per request, whatever the outcome.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().clone(), |original| original.0.clone());
    let request_id = header_value(request.headers(), REQUEST_ID_HEADER).to_string();

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %uri.path(),
        request_id = %request_id,
    );

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = response.status().as_u16();

    span.in_scope(|| match response.extensions().get::<ReplyOutcome>() {
        Some(outcome) if outcome.code == OK_CODE => {
            info!(code = outcome.code, status, elapsed_ms, "{method} {uri} ok");
        }
        Some(outcome) => {
            error!(
                code = outcome.code,
                message = %outcome.message,
                status,
                elapsed_ms,
                "{method} {uri} failed"
            );
        }
        None => {
            warn!(status, elapsed_ms, "{method} {uri} answered without envelope");
        }
    });

    response
}

/// Response for a panicking request: the `InternalError` envelope.
///
/// The panic payload is logged; the client only sees the generic message.
#[allow(clippy::needless_pass_by_value)]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = %detail, "handler panicked");

    ApiError::from(ProviderError::INTERNAL_ERROR).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::reply::Reply;
    use axum::{Router, body::Body, http::Request, http::StatusCode, middleware::from_fn, routing::get};
    use tower::{ServiceBuilder, ServiceExt};
    use tower_http::catch_panic::CatchPanicLayer;
    use weboffice_core::Empty;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { Reply(Empty {}) }))
            .route(
                "/denied",
                get(|| async { Err::<Reply<Empty>, _>(ApiError::from(ProviderError::PERMISSION_DENIED)) }),
            )
            .route(
                "/boom",
                get(|| async {
                    if true {
                        panic!("provider exploded: secret=hunter2");
                    }
                    Reply(Empty {})
                }),
            )
            .layer(
                ServiceBuilder::new()
                    .layer(from_fn(log_request))
                    .layer(CatchPanicLayer::custom(handle_panic)),
            )
    }

    async fn call(path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri(path)
            .header(REQUEST_ID_HEADER, "req-1")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (status, body) = call("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"code": 0, "data": {}}));
    }

    #[tokio::test]
    async fn test_failure_passes_through() {
        let (status, body) = call("/denied").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], 40003);
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let (status, body) = call("/boom").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"code": 50001, "message": "internal error"})
        );
    }
}
