//! Preview routes: file metadata, download location and permissions.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::reply::{ApiResult, Reply};
use axum::extract::{Path, State, rejection::PathRejection};
use weboffice_core::{DownloadInfo, FileInfo, FilePermission, PreviewProvider};

/// `GET` file metadata.
pub const FILE_PATH: &str = "/v3/3rd/files/:file_id";
/// `GET` download location.
pub const FILE_DOWNLOAD_PATH: &str = "/v3/3rd/files/:file_id/download";
/// `GET` permission flags.
pub const FILE_PERMISSION_PATH: &str = "/v3/3rd/files/:file_id/permission";

/// State of the preview routes.
pub type PreviewState = CapabilityState<dyn PreviewProvider>;

pub(crate) fn routes(state: PreviewState) -> RouteGroup {
    RouteGroup::<PreviewState>::new()
        .route(RouteMethod::Get, FILE_PATH, get_file)
        .route(RouteMethod::Get, FILE_DOWNLOAD_PATH, get_file_download)
        .route(RouteMethod::Get, FILE_PERMISSION_PATH, get_file_permission)
        .with_state(state)
}

/// Get file metadata.
///
/// # Endpoint
///
/// ```text
/// GET /v3/3rd/files/{file_id}
/// ```
///
/// # Response
///
/// ```json
/// {"code": 0, "data": {"id": "f1", "name": "doc.docx", "version": 1, ...}}
/// ```
pub async fn get_file(
    State(state): State<PreviewState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<FileInfo> {
    let Path(file_id) = path?;
    Ok(Reply(state.provider.get_file(&ctx, &file_id).await?))
}

/// Get a download location for the current version.
pub async fn get_file_download(
    State(state): State<PreviewState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<DownloadInfo> {
    let Path(file_id) = path?;
    Ok(Reply(state.provider.get_file_download(&ctx, &file_id).await?))
}

/// Get the caller's permission flags.
pub async fn get_file_permission(
    State(state): State<PreviewState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<FilePermission> {
    let Path(file_id) = path?;
    Ok(Reply(state.provider.get_file_permission(&ctx, &file_id).await?))
}
