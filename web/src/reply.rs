//! The uniform response envelope.
//!
//! Every gateway route answers with
//!
//! ```json
//! {"code": 0, "data": {...}}
//! {"code": 40004, "message": "file not exists"}
//! ```

use crate::error::ApiError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use weboffice_core::OK_CODE;

/// Response body shared by success and failure.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    /// `0` on success, the wire code on failure.
    pub code: i32,
    /// Failure message; omitted when empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Success payload; omitted on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Outcome of a request, attached to the response for the request log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    /// Wire code sent to the client.
    pub code: i32,
    /// Message sent to the client, empty on success.
    pub message: String,
}

/// Successful handler result: HTTP 200 with `{"code": 0, "data": T}`.
#[derive(Debug)]
pub struct Reply<T>(pub T);

/// Result type for gateway handlers.
pub type ApiResult<T> = Result<Reply<T>, ApiError>;

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            code: OK_CODE,
            message: String::new(),
            data: Some(self.0),
        };

        let mut response = (StatusCode::OK, Json(body)).into_response();
        response.extensions_mut().insert(ReplyOutcome {
            code: OK_CODE,
            message: String::new(),
        });
        response
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use weboffice_core::{Empty, UserInfo};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_reply_wraps_data() {
        let user = UserInfo {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            avatar_url: String::new(),
        };
        let response = Reply(vec![user]).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 0, "data": [{"id": "u1", "name": "Ada", "avatar_url": ""}]})
        );
    }

    #[tokio::test]
    async fn test_empty_reply_has_explicit_data() {
        let response = Reply(Empty {}).into_response();
        assert_eq!(
            response.extensions().get::<ReplyOutcome>(),
            Some(&ReplyOutcome {
                code: 0,
                message: String::new()
            })
        );
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"code": 0, "data": {}})
        );
    }
}
