//! Error responses for gateway handlers.
//!
//! [`ApiError`] bridges a classified [`ProviderError`] to an HTTP response:
//! the taxonomy decides the status, the body is the failure envelope.
//! Request-parsing failures detected by the gateway itself are classified
//! as `InvalidArguments` through the `From<*Rejection>` impls below.

use crate::reply::{Envelope, ReplyOutcome};
use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use weboffice_core::{Empty, ProviderError};

/// Handler error: a classified failure on its way to the wire.
///
/// # Examples
///
/// ```ignore
/// async fn handler(ctx: RequestContext) -> ApiResult<FileInfo> {
///     let file = provider.get_file(&ctx.0, "f1").await?;
///     Ok(Reply(file))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(ProviderError);

impl ApiError {
    /// `InvalidArguments` carrying the parser's message.
    #[must_use]
    pub fn invalid_arguments(message: impl fmt::Display) -> Self {
        Self(ProviderError::INVALID_ARGUMENTS.with_message(message.to_string()))
    }

    /// `InternalError` carrying the underlying message.
    #[must_use]
    pub fn internal(message: impl fmt::Display) -> Self {
        Self(ProviderError::INTERNAL_ERROR.with_message(message.to_string()))
    }

    /// The classified failure.
    #[must_use]
    pub const fn provider_error(&self) -> &ProviderError {
        &self.0
    }

    /// HTTP status mapped from the taxonomy.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        Self(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_arguments(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::invalid_arguments(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::invalid_arguments(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::invalid_arguments(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_arguments(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let outcome = ReplyOutcome {
            code: self.0.code(),
            message: self.0.message().to_string(),
        };
        let body = Envelope::<Empty> {
            code: self.0.code(),
            message: self.0.message().to_string(),
            data: None,
        };

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(outcome);
        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use weboffice_core::ErrorKind;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_file_not_exists_response() {
        let response = ApiError::from(ProviderError::FILE_NOT_EXISTS).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.extensions().get::<ReplyOutcome>().map(|o| o.code),
            Some(40004)
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 40004, "message": "file not exists"})
        );
    }

    #[tokio::test]
    async fn test_every_kind_maps_to_its_status() {
        for kind in ErrorKind::ALL {
            let response = ApiError::from(ProviderError::new(kind)).into_response();
            assert_eq!(response.status().as_u16(), kind.status(), "{kind:?}");
            let body = body_json(response).await;
            assert_eq!(body["code"], kind.code());
            assert!(body.get("data").is_none());
        }
    }

    #[test]
    fn test_invalid_arguments_keeps_message() {
        let err = ApiError::invalid_arguments("expected value at line 1 column 1");
        assert_eq!(err.provider_error().kind(), ErrorKind::InvalidArguments);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            err.to_string(),
            "code:40005 message:expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_json_error_is_invalid_arguments() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::from(parse_err);
        assert_eq!(err.provider_error().code(), 40005);
    }
}
