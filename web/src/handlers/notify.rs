//! Event notification route.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::reply::{ApiResult, Reply};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};
use weboffice_core::{Empty, NotifyArgs, NotifyProvider};

/// `POST` event, JSON body.
pub const NOTIFY_PATH: &str = "/v3/3rd/notify";

/// State of the notify route.
pub type NotifyState = CapabilityState<dyn NotifyProvider>;

pub(crate) fn routes(state: NotifyState) -> RouteGroup {
    RouteGroup::<NotifyState>::new()
        .route(RouteMethod::Post, NOTIFY_PATH, on_notify)
        .with_state(state)
}

/// Hand an event to the notify provider. Answers with an empty payload.
///
/// # Endpoint
///
/// ```text
/// POST /v3/3rd/notify
/// Content-Type: application/json
///
/// {"file_id": "f1", "type": "file_open", "content": {"session_id": "s1"}}
/// ```
pub async fn on_notify(
    State(state): State<NotifyState>,
    RequestContext(ctx): RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Empty> {
    let args: NotifyArgs = serde_json::from_slice(&body?)?;
    state.provider.on_notify(&ctx, &args).await?;
    Ok(Reply(Empty {}))
}
