//! Watermark route.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::reply::{ApiResult, Reply};
use axum::extract::{Path, State, rejection::PathRejection};
use weboffice_core::{Watermark, WatermarkProvider};

/// `GET` watermark parameters.
pub const WATERMARK_PATH: &str = "/v3/3rd/files/:file_id/watermark";

/// State of the watermark route.
pub type WatermarkState = CapabilityState<dyn WatermarkProvider>;

pub(crate) fn routes(state: WatermarkState) -> RouteGroup {
    RouteGroup::<WatermarkState>::new()
        .route(RouteMethod::Get, WATERMARK_PATH, get_file_watermark)
        .with_state(state)
}

/// Get the watermark rendering parameters of a file.
pub async fn get_file_watermark(
    State(state): State<WatermarkState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Watermark> {
    let Path(file_id) = path?;
    Ok(Reply(state.provider.get_file_watermark(&ctx, &file_id).await?))
}
