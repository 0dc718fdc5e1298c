//! Upload content stream and the update request it belongs to.
//!
//! The gateway owns the [`UploadStream`] for the whole request. Providers
//! borrow it through [`UpdateFileArgs`] to read the content; the gateway
//! closes it once the provider call has returned.

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

/// A readable upload source with an explicit release step.
#[async_trait]
pub trait UploadSource: AsyncRead + Send + Unpin {
    /// Release the underlying resource.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while releasing the resource.
    async fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UploadSource for io::Cursor<Bytes> {}

/// Binary content of an upload.
///
/// Reading after [`close`](Self::close) fails with `BrokenPipe`.
pub struct UploadStream {
    source: Option<Box<dyn UploadSource>>,
}

impl UploadStream {
    /// Wrap an upload source.
    pub fn new(source: impl UploadSource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
        }
    }

    /// Stream over an in-memory buffer.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(io::Cursor::new(bytes.into()))
    }

    /// Whether the stream has been closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.source.is_none()
    }

    /// Read the remaining content into memory.
    ///
    /// # Errors
    ///
    /// Returns the read error, or `BrokenPipe` if the stream is closed.
    pub async fn read_to_end(&mut self) -> io::Result<Vec<u8>> {
        let mut content = Vec::new();
        AsyncReadExt::read_to_end(self, &mut content).await?;
        Ok(content)
    }

    /// Close the stream. Closing an already closed stream is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the error raised by the source while releasing itself. The
    /// stream counts as closed either way.
    pub async fn close(&mut self) -> io::Result<()> {
        match self.source.take() {
            Some(mut source) => source.close().await,
            None => Ok(()),
        }
    }
}

impl AsyncRead for UploadStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut().source.as_mut() {
            Some(source) => Pin::new(source.as_mut()).poll_read(cx, buf),
            None => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "upload stream is closed",
            ))),
        }
    }
}

impl fmt::Debug for UploadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadStream")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Everything the client sent to the upload route, as one update request.
#[derive(Debug)]
pub struct UpdateFileArgs {
    /// File name.
    pub name: String,
    /// Declared size in bytes; `0` when absent or unparsable.
    pub size: i64,
    /// Declared SHA-1 of the content, hex encoded.
    pub sha1: String,
    /// Whether the user saved explicitly rather than by autosave.
    pub is_manual: bool,
    /// The file content.
    pub content: UploadStream,
}
