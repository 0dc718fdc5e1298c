//! Multipart upload assembly.
//!
//! The upload route receives the content as a `file` part next to the text
//! fields `name`, `sha1`, `size` and `is_manual`. [`read_update_form`] turns
//! the form into [`UpdateFileArgs`]; [`dispatch_update`] hands it to the
//! provider and closes the content stream afterwards, on every path.

use crate::error::ApiError;
use crate::params::{flag_or_false, int_or_zero};
use axum::{body::Bytes, extract::Multipart};
use std::collections::HashMap;
use tracing::{debug, warn};
use weboffice_core::{Context, EditProvider, FileInfo, ProviderError, UpdateFileArgs, UploadStream};

/// Name of the part carrying the file content.
pub const FILE_FIELD: &str = "file";

/// Assemble the update request from a multipart form.
///
/// Text fields keep their first value. Unparsable `size` counts as `0` and
/// unparsable `is_manual` as `false`.
///
/// # Errors
///
/// - `InvalidArguments` when the form is malformed or has no `file` part
/// - `InternalError` when the `file` part cannot be read
pub(crate) async fn read_update_form(mut multipart: Multipart) -> Result<UpdateFileArgs, ApiError> {
    let mut content: Option<Bytes> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        if name == FILE_FIELD {
            if content.is_none() {
                content = Some(field.bytes().await.map_err(ApiError::internal)?);
            }
            continue;
        }

        let value = field.text().await?;
        fields.entry(name).or_insert(value);
    }

    let content = content.ok_or_else(|| ApiError::invalid_arguments("missing multipart part \"file\""))?;
    let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or_default();

    debug!(bytes = content.len(), "upload form assembled");

    Ok(UpdateFileArgs {
        name: field("name").to_string(),
        size: int_or_zero(field("size")),
        sha1: field("sha1").to_string(),
        is_manual: flag_or_false(field("is_manual")),
        content: UploadStream::from_bytes(content),
    })
}

/// Call the edit provider, then close the content stream.
///
/// The provider's result is returned unchanged; a close failure is only
/// logged.
pub(crate) async fn dispatch_update(
    provider: &dyn EditProvider,
    ctx: &Context,
    file_id: &str,
    mut args: UpdateFileArgs,
) -> Result<FileInfo, ProviderError> {
    let result = provider.update_file(ctx, file_id, &mut args).await;

    if let Err(err) = args.content.close().await {
        warn!(file_id, error = %err, "failed to close upload stream");
    }

    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{Request, header},
    };
    use std::io;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Poll;
    use tokio::io::{AsyncRead, ReadBuf};
    use tokio::sync::Mutex;
    use weboffice_core::{ErrorKind, RenameFileArgs, UploadSource};

    const BOUNDARY: &str = "X-GATEWAY-BOUNDARY";

    fn form(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (name, filename, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(filename) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn read(request: Request<Body>) -> Result<UpdateFileArgs, ApiError> {
        let multipart = Multipart::from_request(request, &()).await.unwrap();
        read_update_form(multipart).await
    }

    #[tokio::test]
    async fn test_form_fields_are_collected() {
        let mut args = read(form(&[
            ("name", None, "a.txt"),
            ("sha1", None, "deadbeef"),
            ("size", None, "123"),
            ("is_manual", None, "true"),
            ("name", None, "ignored.txt"),
            ("file", Some("a.txt"), "0123456789"),
        ]))
        .await
        .unwrap();

        assert_eq!(args.name, "a.txt");
        assert_eq!(args.sha1, "deadbeef");
        assert_eq!(args.size, 123);
        assert!(args.is_manual);
        assert_eq!(args.content.read_to_end().await.unwrap(), b"0123456789");
    }

    #[tokio::test]
    async fn test_bad_numbers_fall_back() {
        let args = read(form(&[
            ("size", None, "12kb"),
            ("is_manual", None, "yes"),
            ("file", Some("a.txt"), ""),
        ]))
        .await
        .unwrap();

        assert_eq!(args.size, 0);
        assert!(!args.is_manual);
        assert_eq!(args.name, "");
    }

    #[tokio::test]
    async fn test_missing_file_part_is_invalid_arguments() {
        let err = read(form(&[("name", None, "a.txt")])).await.unwrap_err();
        assert_eq!(err.provider_error().kind(), ErrorKind::InvalidArguments);
    }

    /// Source that counts close calls and can fail them.
    struct CountingSource {
        inner: io::Cursor<Vec<u8>>,
        closes: Arc<AtomicUsize>,
        fail_close: bool,
    }

    impl AsyncRead for CountingSource {
        fn poll_read(
            mut self: Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Pin::new(&mut self.inner).poll_read(cx, buf)
        }
    }

    #[async_trait]
    impl UploadSource for CountingSource {
        async fn close(&mut self) -> io::Result<()> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            if self.fail_close {
                Err(io::Error::other("disk went away"))
            } else {
                Ok(())
            }
        }
    }

    struct RecordingEdit {
        outcome: Result<FileInfo, ProviderError>,
        seen: Mutex<Option<Vec<u8>>>,
    }

    #[async_trait]
    impl EditProvider for RecordingEdit {
        async fn update_file(
            &self,
            _ctx: &Context,
            _file_id: &str,
            args: &mut UpdateFileArgs,
        ) -> Result<FileInfo, ProviderError> {
            let content = args.content.read_to_end().await.unwrap();
            *self.seen.lock().await = Some(content);
            self.outcome.clone()
        }

        async fn rename_file(
            &self,
            _ctx: &Context,
            _file_id: &str,
            _args: &RenameFileArgs,
        ) -> Result<(), ProviderError> {
            Ok(())
        }
    }

    fn args(closes: &Arc<AtomicUsize>, fail_close: bool) -> UpdateFileArgs {
        UpdateFileArgs {
            name: "a.txt".to_string(),
            size: 5,
            sha1: String::new(),
            is_manual: false,
            content: UploadStream::new(CountingSource {
                inner: io::Cursor::new(b"hello".to_vec()),
                closes: Arc::clone(closes),
                fail_close,
            }),
        }
    }

    #[tokio::test]
    async fn test_stream_closed_after_success() {
        let closes = Arc::new(AtomicUsize::new(0));
        let provider = RecordingEdit {
            outcome: Ok(FileInfo::new("f1", "a.txt", 2)),
            seen: Mutex::new(None),
        };

        let file = dispatch_update(&provider, &Context::new("tok"), "f1", args(&closes, false))
            .await
            .unwrap();

        assert_eq!(file.version, 2);
        assert_eq!(provider.seen.lock().await.as_deref(), Some(&b"hello"[..]));
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stream_closed_after_failure() {
        let closes = Arc::new(AtomicUsize::new(0));
        let provider = RecordingEdit {
            outcome: Err(ProviderError::SPACE_FULL),
            seen: Mutex::new(None),
        };

        let err = dispatch_update(&provider, &Context::new("tok"), "f1", args(&closes, false))
            .await
            .unwrap_err();

        assert_eq!(err, ProviderError::SPACE_FULL);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_close_failure_keeps_provider_result() {
        let closes = Arc::new(AtomicUsize::new(0));
        let provider = RecordingEdit {
            outcome: Ok(FileInfo::new("f1", "a.txt", 3)),
            seen: Mutex::new(None),
        };

        let file = dispatch_update(&provider, &Context::new("tok"), "f1", args(&closes, true))
            .await
            .unwrap();

        assert_eq!(file.version, 3);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }
}
