//! Edit routes: content upload and rename.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::reply::{ApiResult, Reply};
use crate::upload::{dispatch_update, read_update_form};
use axum::{
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, Path, State,
        multipart::MultipartRejection,
        rejection::{BytesRejection, PathRejection},
    },
};
use weboffice_core::{EditProvider, Empty, FileInfo, RenameFileArgs};

/// `POST` multipart content upload.
pub const UPLOAD_PATH: &str = "/v3/3rd/files/:file_id/upload";
/// `PUT` rename, body `{"name": "..."}`.
pub const RENAME_PATH: &str = "/v3/3rd/files/:file_id/name";

/// State of the edit routes.
pub type EditState = CapabilityState<dyn EditProvider>;

/// Edit routes. Uploads are capped at `max_upload_size` bytes, or not at
/// all when it is `None`.
pub(crate) fn routes(state: EditState, max_upload_size: Option<usize>) -> RouteGroup {
    let limit = max_upload_size.map_or_else(DefaultBodyLimit::disable, DefaultBodyLimit::max);

    RouteGroup::<EditState>::new()
        .route(RouteMethod::Post, UPLOAD_PATH, update_file)
        .route(RouteMethod::Put, RENAME_PATH, rename_file)
        .with_state(state)
        .body_limit(limit)
}

/// Save new content.
///
/// # Endpoint
///
/// ```text
/// POST /v3/3rd/files/{file_id}/upload
/// Content-Type: multipart/form-data
///
/// file=<binary>, name=a.docx, sha1=<hex>, size=1024, is_manual=true
/// ```
///
/// # Response
///
/// The refreshed file metadata.
pub async fn update_file(
    State(state): State<EditState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<FileInfo> {
    let Path(file_id) = path?;
    let args = read_update_form(multipart?).await?;
    let file = dispatch_update(state.provider.as_ref(), &ctx, &file_id, args).await?;
    Ok(Reply(file))
}

/// Rename a file. Answers with an empty payload.
pub async fn rename_file(
    State(state): State<EditState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Empty> {
    let Path(file_id) = path?;
    let args: RenameFileArgs = serde_json::from_slice(&body?)?;
    state.provider.rename_file(&ctx, &file_id, &args).await?;
    Ok(Reply(Empty {}))
}
