//! Version history routes.

use super::{CapabilityState, RouteGroup, RouteMethod};
use crate::extractors::RequestContext;
use crate::params::{first_value, int_or_zero, query_pairs};
use crate::reply::{ApiResult, Reply};
use axum::extract::{Path, RawQuery, State, rejection::PathRejection};
use weboffice_core::{DownloadInfo, FileInfo, VersionProvider};

/// `GET` version list, `?offset=&limit=`.
pub const VERSIONS_PATH: &str = "/v3/3rd/files/:file_id/versions";
/// `GET` one version.
pub const VERSION_PATH: &str = "/v3/3rd/files/:file_id/versions/:version";
/// `GET` download location of one version.
pub const VERSION_DOWNLOAD_PATH: &str = "/v3/3rd/files/:file_id/versions/:version/download";

/// State of the version routes.
pub type VersionState = CapabilityState<dyn VersionProvider>;

pub(crate) fn routes(state: VersionState) -> RouteGroup {
    RouteGroup::<VersionState>::new()
        .route(RouteMethod::Get, VERSIONS_PATH, get_file_versions)
        .route(RouteMethod::Get, VERSION_PATH, get_file_version)
        .route(RouteMethod::Get, VERSION_DOWNLOAD_PATH, get_file_version_download)
        .with_state(state)
}

/// List versions. Unparsable `offset`/`limit` count as `0`.
pub async fn get_file_versions(
    State(state): State<VersionState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<String>, PathRejection>,
    RawQuery(query): RawQuery,
) -> ApiResult<Vec<FileInfo>> {
    let Path(file_id) = path?;
    let pairs = query_pairs(query.as_deref());
    let offset = int_or_zero(first_value(&pairs, "offset"));
    let limit = int_or_zero(first_value(&pairs, "limit"));

    Ok(Reply(
        state
            .provider
            .get_file_versions(&ctx, &file_id, offset, limit)
            .await?,
    ))
}

/// Get one version. An unparsable version counts as `0`.
pub async fn get_file_version(
    State(state): State<VersionState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<FileInfo> {
    let Path((file_id, version)) = path?;
    let version = int_or_zero(&version);
    Ok(Reply(state.provider.get_file_version(&ctx, &file_id, version).await?))
}

/// Get a download location for one version.
pub async fn get_file_version_download(
    State(state): State<VersionState>,
    RequestContext(ctx): RequestContext,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<DownloadInfo> {
    let Path((file_id, version)) = path?;
    let version = int_or_zero(&version);
    Ok(Reply(
        state
            .provider
            .get_file_version_download(&ctx, &file_id, version)
            .await?,
    ))
}
