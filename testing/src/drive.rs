//! Mock drive implementing every capability provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use weboffice_core::{
    Context, DownloadInfo, EditProvider, FileInfo, FilePermission, NotifyArgs, NotifyProvider,
    PreviewProvider, ProviderError, RenameFileArgs, Result, UpdateFileArgs, UserInfo, UserProvider,
    VersionProvider, Watermark, WatermarkProvider,
};

/// Base of the download URLs handed out by [`MockDrive`].
pub const DOWNLOAD_BASE: &str = "https://drive.test/content";

/// An upload the drive accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    /// Target file.
    pub file_id: String,
    /// Name sent with the upload.
    pub name: String,
    /// Declared SHA-1.
    pub sha1: String,
    /// Declared size.
    pub size: i64,
    /// Manual save flag.
    pub is_manual: bool,
    /// Bytes read from the content stream.
    pub content: Vec<u8>,
}

/// A rename the drive applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRename {
    /// Renamed file.
    pub file_id: String,
    /// New name.
    pub name: String,
}

#[derive(Debug, Default)]
struct DriveState {
    /// Versions per file, oldest first.
    files: HashMap<String, Vec<FileInfo>>,
    users: HashMap<String, UserInfo>,
    watermarks: HashMap<String, Watermark>,
    uploads: Vec<RecordedUpload>,
    renames: Vec<RecordedRename>,
    notifications: Vec<NotifyArgs>,
    calls: Vec<&'static str>,
    contexts: Vec<Context>,
    failure: Option<ProviderError>,
    clock: i64,
}

impl DriveState {
    fn latest(&self, file_id: &str) -> Result<&FileInfo> {
        self.files
            .get(file_id)
            .and_then(|versions| versions.last())
            .ok_or(ProviderError::FILE_NOT_EXISTS)
    }

    fn version(&self, file_id: &str, version: i32) -> Result<&FileInfo> {
        self.files
            .get(file_id)
            .ok_or(ProviderError::FILE_NOT_EXISTS)?
            .iter()
            .find(|info| info.version == version)
            .ok_or(ProviderError::FILE_VERSION_NOT_EXISTS)
    }

    fn tick(&mut self) -> i64 {
        self.clock += 1;
        self.clock
    }
}

/// In-memory drive.
///
/// Clones share the same store, so a test can keep a handle for
/// assertions after handing one to the gateway.
#[derive(Debug, Clone, Default)]
pub struct MockDrive {
    state: Arc<Mutex<DriveState>>,
}

impl MockDrive {
    /// Empty drive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file version. Versions of one file must be added in order.
    #[must_use]
    pub fn with_file(self, file: FileInfo) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.files.entry(file.id.clone()).or_default().push(file);
        }
        self
    }

    /// Add a user profile.
    #[must_use]
    pub fn with_user(self, user: UserInfo) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.users.insert(user.id.clone(), user);
        }
        self
    }

    /// Set the watermark of a file.
    #[must_use]
    pub fn with_watermark(self, file_id: impl Into<String>, watermark: Watermark) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.watermarks.insert(file_id.into(), watermark);
        }
        self
    }

    /// Fail every following call with `error`.
    pub fn fail_with(&self, error: ProviderError) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = Some(error);
        }
    }

    /// Stop failing calls.
    pub fn clear_failure(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = None;
        }
    }

    /// Number of provider calls so far, failed ones included.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.read(|state| state.calls.len())
    }

    /// Names of the provider operations called, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.read(|state| state.calls.clone())
    }

    /// Context of the most recent call.
    #[must_use]
    pub fn last_context(&self) -> Option<Context> {
        self.read(|state| state.contexts.last().cloned())
    }

    /// Accepted uploads.
    #[must_use]
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.read(|state| state.uploads.clone())
    }

    /// Applied renames.
    #[must_use]
    pub fn renames(&self) -> Vec<RecordedRename> {
        self.read(|state| state.renames.clone())
    }

    /// Received notifications.
    #[must_use]
    pub fn notifications(&self) -> Vec<NotifyArgs> {
        self.read(|state| state.notifications.clone())
    }

    /// Latest version of a file, if stored.
    #[must_use]
    pub fn file(&self, file_id: &str) -> Option<FileInfo> {
        self.read(|state| state.latest(file_id).ok().cloned())
    }

    fn read<T: Default>(&self, f: impl FnOnce(&DriveState) -> T) -> T {
        self.state.lock().map(|state| f(&state)).unwrap_or_default()
    }

    /// Record a call and return the locked store, or the forced failure.
    fn begin(&self, operation: &'static str, ctx: &Context) -> Result<MutexGuard<'_, DriveState>> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| ProviderError::INTERNAL_ERROR)?;

        state.calls.push(operation);
        state.contexts.push(ctx.clone());
        tracing::debug!(operation, "mock drive call");

        match state.failure.clone() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }
}

fn download_info(file_id: &str, version: i32) -> DownloadInfo {
    DownloadInfo {
        url: format!("{DOWNLOAD_BASE}/{file_id}/{version}"),
        headers: HashMap::new(),
    }
}

#[async_trait]
impl PreviewProvider for MockDrive {
    async fn get_file(&self, ctx: &Context, file_id: &str) -> Result<FileInfo> {
        let state = self.begin("get_file", ctx)?;
        state.latest(file_id).cloned()
    }

    async fn get_file_download(&self, ctx: &Context, file_id: &str) -> Result<DownloadInfo> {
        let state = self.begin("get_file_download", ctx)?;
        let latest = state.latest(file_id)?;
        Ok(download_info(file_id, latest.version))
    }

    async fn get_file_permission(&self, ctx: &Context, file_id: &str) -> Result<FilePermission> {
        let state = self.begin("get_file_permission", ctx)?;
        state.latest(file_id)?;

        Ok(FilePermission {
            user_id: ctx.query_value("user_id").unwrap_or_default().to_string(),
            read: 1,
            update: 1,
            download: 1,
            rename: 1,
            history: 1,
            copy: 1,
            print: 1,
            saveas: 1,
            comment: 1,
        })
    }
}

#[async_trait]
impl UserProvider for MockDrive {
    async fn get_users(&self, ctx: &Context, user_ids: &[String]) -> Result<Vec<UserInfo>> {
        let state = self.begin("get_users", ctx)?;
        Ok(user_ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl WatermarkProvider for MockDrive {
    async fn get_file_watermark(&self, ctx: &Context, file_id: &str) -> Result<Watermark> {
        let state = self.begin("get_file_watermark", ctx)?;
        state.latest(file_id)?;
        Ok(state.watermarks.get(file_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl EditProvider for MockDrive {
    async fn update_file(
        &self,
        ctx: &Context,
        file_id: &str,
        args: &mut UpdateFileArgs,
    ) -> Result<FileInfo> {
        // Checked before reading so a forced failure leaves the stream untouched.
        drop(self.begin("update_file", ctx)?);

        let content = args
            .content
            .read_to_end()
            .await
            .map_err(|err| ProviderError::INTERNAL_ERROR.with_message(err.to_string()))?;

        let mut state = self
            .state
            .lock()
            .map_err(|_| ProviderError::INTERNAL_ERROR)?;
        let mut next = state.latest(file_id)?.clone();
        let now = state.tick();

        next.version += 1;
        if !args.name.is_empty() {
            next.name.clone_from(&args.name);
        }
        next.size = i64::try_from(content.len()).unwrap_or(i64::MAX);
        next.modify_time = now;
        next.modifier_id = ctx.query_value("user_id").unwrap_or_default().to_string();

        state.uploads.push(RecordedUpload {
            file_id: file_id.to_string(),
            name: args.name.clone(),
            sha1: args.sha1.clone(),
            size: args.size,
            is_manual: args.is_manual,
            content,
        });
        state
            .files
            .entry(file_id.to_string())
            .or_default()
            .push(next.clone());

        Ok(next)
    }

    async fn rename_file(&self, ctx: &Context, file_id: &str, args: &RenameFileArgs) -> Result<()> {
        let mut state = self.begin("rename_file", ctx)?;

        if args.name.is_empty() {
            return Err(ProviderError::INVALID_ARGUMENTS.with_message("name is empty"));
        }
        state.latest(file_id)?;

        let conflict = state.files.iter().any(|(id, versions)| {
            id != file_id && versions.last().is_some_and(|info| info.name == args.name)
        });
        if conflict {
            return Err(ProviderError::FILE_NAME_CONFLICT);
        }

        let now = state.tick();
        if let Some(latest) = state.files.get_mut(file_id).and_then(|v| v.last_mut()) {
            latest.name.clone_from(&args.name);
            latest.modify_time = now;
        }
        state.renames.push(RecordedRename {
            file_id: file_id.to_string(),
            name: args.name.clone(),
        });

        Ok(())
    }
}

#[async_trait]
impl VersionProvider for MockDrive {
    /// Versions oldest first; a non-positive `limit` returns the rest.
    async fn get_file_versions(
        &self,
        ctx: &Context,
        file_id: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<FileInfo>> {
        let state = self.begin("get_file_versions", ctx)?;
        let versions = state
            .files
            .get(file_id)
            .ok_or(ProviderError::FILE_NOT_EXISTS)?;

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit)
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(usize::MAX);

        Ok(versions.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn get_file_version(&self, ctx: &Context, file_id: &str, version: i32) -> Result<FileInfo> {
        let state = self.begin("get_file_version", ctx)?;
        state.version(file_id, version).cloned()
    }

    async fn get_file_version_download(
        &self,
        ctx: &Context,
        file_id: &str,
        version: i32,
    ) -> Result<DownloadInfo> {
        let state = self.begin("get_file_version_download", ctx)?;
        state.version(file_id, version)?;
        Ok(download_info(file_id, version))
    }
}

#[async_trait]
impl NotifyProvider for MockDrive {
    async fn on_notify(&self, ctx: &Context, args: &NotifyArgs) -> Result<()> {
        let mut state = self.begin("on_notify", ctx)?;
        state.notifications.push(args.clone());
        Ok(())
    }
}
