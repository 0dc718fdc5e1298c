//! Wire error taxonomy shared by providers and the gateway.
//!
//! Providers signal failures exclusively through [`ProviderError`]. Each
//! [`ErrorKind`] is bound to a stable wire code (returned in the response
//! body) and a transport status (returned as the HTTP status).
//!
//! The canonical errors are associated constants. Deriving an error with a
//! different message always produces a new value:
//!
//! ```
//! use weboffice_core::{ErrorKind, ProviderError};
//!
//! let err = ProviderError::FILE_NOT_EXISTS.with_message("f1 was deleted");
//! assert_eq!(err.kind(), ErrorKind::FileNotExists);
//! assert_eq!(err.message(), "f1 was deleted");
//! assert_eq!(ProviderError::FILE_NOT_EXISTS.message(), "file not exists");
//! ```

use std::borrow::Cow;
use thiserror::Error;

/// Wire code of a successful response.
pub const OK_CODE: i32 = 0;

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// The closed set of failure kinds understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Token missing or rejected.
    Unauthorized,
    /// Caller may not perform the operation.
    PermissionDenied,
    /// The file does not exist.
    FileNotExists,
    /// Request arguments are malformed.
    InvalidArguments,
    /// Storage quota exhausted.
    SpaceFull,
    /// Provider-defined failure with a free-form message.
    Custom,
    /// Another file already has the requested name.
    FileNameConflict,
    /// The requested file version does not exist.
    FileVersionNotExists,
    /// A requested user does not exist.
    UserNotExists,
    /// Anything the taxonomy cannot classify.
    InternalError,
}

impl ErrorKind {
    /// Every kind, in wire-code order.
    pub const ALL: [Self; 10] = [
        Self::Unauthorized,
        Self::PermissionDenied,
        Self::FileNotExists,
        Self::InvalidArguments,
        Self::SpaceFull,
        Self::Custom,
        Self::FileNameConflict,
        Self::FileVersionNotExists,
        Self::UserNotExists,
        Self::InternalError,
    ];

    /// Stable wire code returned in the `code` field of the envelope.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Unauthorized => 40002,
            Self::PermissionDenied => 40003,
            Self::FileNotExists => 40004,
            Self::InvalidArguments => 40005,
            Self::SpaceFull => 40006,
            Self::Custom => 40007,
            Self::FileNameConflict => 40008,
            Self::FileVersionNotExists => 40009,
            Self::UserNotExists => 40010,
            Self::InternalError => 50001,
        }
    }

    /// HTTP status the gateway answers with.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::Unauthorized => 401,
            Self::InternalError => 500,
            _ => 403,
        }
    }

    /// Message used when the provider does not supply one.
    ///
    /// `Custom` has no default; its message always comes from the caller.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::PermissionDenied => "permission denied",
            Self::FileNotExists => "file not exists",
            Self::InvalidArguments => "invalid arguments",
            Self::SpaceFull => "space full",
            Self::Custom => "",
            Self::FileNameConflict => "filename conflict",
            Self::FileVersionNotExists => "file version not exists",
            Self::UserNotExists => "user not exists",
            Self::InternalError => "internal error",
        }
    }

    /// Look a kind up by its wire code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// A classified provider failure: kind plus the message sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("code:{} message:{}", .kind.code(), .message)]
pub struct ProviderError {
    kind: ErrorKind,
    message: Cow<'static, str>,
}

impl ProviderError {
    /// `40002` / 401.
    pub const UNAUTHORIZED: Self = Self::canonical(ErrorKind::Unauthorized);
    /// `40003` / 403.
    pub const PERMISSION_DENIED: Self = Self::canonical(ErrorKind::PermissionDenied);
    /// `40004` / 403.
    pub const FILE_NOT_EXISTS: Self = Self::canonical(ErrorKind::FileNotExists);
    /// `40005` / 403.
    pub const INVALID_ARGUMENTS: Self = Self::canonical(ErrorKind::InvalidArguments);
    /// `40006` / 403.
    pub const SPACE_FULL: Self = Self::canonical(ErrorKind::SpaceFull);
    /// `40008` / 403.
    pub const FILE_NAME_CONFLICT: Self = Self::canonical(ErrorKind::FileNameConflict);
    /// `40009` / 403.
    pub const FILE_VERSION_NOT_EXISTS: Self = Self::canonical(ErrorKind::FileVersionNotExists);
    /// `40010` / 403.
    pub const USER_NOT_EXISTS: Self = Self::canonical(ErrorKind::UserNotExists);
    /// `50001` / 500.
    pub const INTERNAL_ERROR: Self = Self::canonical(ErrorKind::InternalError);

    const fn canonical(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(kind.default_message()),
        }
    }

    /// Create an error of the given kind with its default message.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self::canonical(kind)
    }

    /// Create a `Custom` (`40007`) error carrying an arbitrary message.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Custom,
            message: Cow::Owned(message.into()),
        }
    }

    /// Derive a new error of the same kind with a different message.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            message: Cow::Owned(message.into()),
        }
    }

    /// The failure kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Wire code for the envelope.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.kind.code()
    }

    /// HTTP status for the response.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.kind.status()
    }

    /// Message for the envelope.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for ProviderError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Unclassified provider failures become `InternalError`.
///
/// The source is logged; only the generic message reaches the wire.
impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = %err, "unclassified provider failure");
        Self::INTERNAL_ERROR
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_table() {
        let expected = [
            (ErrorKind::Unauthorized, 40002, 401, "unauthorized"),
            (ErrorKind::PermissionDenied, 40003, 403, "permission denied"),
            (ErrorKind::FileNotExists, 40004, 403, "file not exists"),
            (ErrorKind::InvalidArguments, 40005, 403, "invalid arguments"),
            (ErrorKind::SpaceFull, 40006, 403, "space full"),
            (ErrorKind::Custom, 40007, 403, ""),
            (ErrorKind::FileNameConflict, 40008, 403, "filename conflict"),
            (ErrorKind::FileVersionNotExists, 40009, 403, "file version not exists"),
            (ErrorKind::UserNotExists, 40010, 403, "user not exists"),
            (ErrorKind::InternalError, 50001, 500, "internal error"),
        ];

        for (kind, code, status, message) in expected {
            assert_eq!(kind.code(), code, "{kind:?}");
            assert_eq!(kind.status(), status, "{kind:?}");
            assert_eq!(kind.default_message(), message, "{kind:?}");
            assert_eq!(ErrorKind::from_code(code), Some(kind));
        }
        assert_eq!(ErrorKind::from_code(OK_CODE), None);
    }

    #[test]
    fn test_with_message_leaves_canonical_untouched() {
        let derived = ProviderError::PERMISSION_DENIED.with_message("read only share");

        assert_eq!(derived.kind(), ErrorKind::PermissionDenied);
        assert_eq!(derived.status(), 403);
        assert_eq!(derived.message(), "read only share");
        assert_eq!(ProviderError::PERMISSION_DENIED.message(), "permission denied");
        assert_eq!(
            ProviderError::new(ErrorKind::PermissionDenied),
            ProviderError::PERMISSION_DENIED
        );
    }

    #[test]
    fn test_custom_error() {
        let err = ProviderError::custom("quota frozen by admin");
        assert_eq!(err.code(), 40007);
        assert_eq!(err.status(), 403);
        assert_eq!(err.message(), "quota frozen by admin");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProviderError::FILE_NOT_EXISTS.to_string(),
            "code:40004 message:file not exists"
        );
    }

    #[test]
    fn test_anyhow_is_coerced_to_internal_error() {
        let err: ProviderError = anyhow::anyhow!("connection refused: db-primary:5432").into();
        assert_eq!(err, ProviderError::INTERNAL_ERROR);
        assert!(!err.message().contains("db-primary"));
    }
}
