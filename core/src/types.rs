//! JSON data shapes exchanged with the WebOffice client.
//!
//! Field names follow the client's wire format exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// File metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileInfo {
    /// File id.
    pub id: String,
    /// Display name including extension.
    pub name: String,
    /// Current version, starting at 1.
    pub version: i32,
    /// Size in bytes.
    pub size: i64,
    /// Creation time, unix seconds.
    pub create_time: i64,
    /// Last modification time, unix seconds.
    pub modify_time: i64,
    /// User id of the creator.
    pub creator_id: String,
    /// User id of the last modifier.
    pub modifier_id: String,
}

impl FileInfo {
    /// Create file metadata with the identifying fields set.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version,
            ..Self::default()
        }
    }
}

/// A time-limited download location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DownloadInfo {
    /// Download URL.
    pub url: String,
    /// Headers the client must send with the download request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Permission flags of the caller on a file. `1` grants, `0` denies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilePermission {
    /// User the permissions apply to.
    pub user_id: String,
    /// May view.
    pub read: i32,
    /// May edit.
    pub update: i32,
    /// May download.
    pub download: i32,
    /// May rename.
    pub rename: i32,
    /// May view history.
    pub history: i32,
    /// May copy content.
    pub copy: i32,
    /// May print.
    pub print: i32,
    /// May save as.
    pub saveas: i32,
    /// May comment.
    pub comment: i32,
}

/// Display profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    pub avatar_url: String,
}

/// Watermark rendering parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Watermark {
    /// `0` none, `1` text.
    #[serde(rename = "type")]
    pub watermark_type: i32,
    /// Watermark text.
    pub value: String,
    /// CSS fill style, e.g. `rgba(192, 192, 192, 0.6)`.
    pub fill_style: String,
    /// CSS font, e.g. `bold 20px Serif`.
    pub font: String,
    /// Rotation in radians.
    pub rotate: f64,
    /// Horizontal spacing.
    pub horizontal: i32,
    /// Vertical spacing.
    pub vertical: i32,
}

/// Body of the rename route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameFileArgs {
    /// New file name.
    pub name: String,
}

/// An asynchronous event pushed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyArgs {
    /// File the event concerns.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub file_id: String,
    /// Event type.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub event_type: String,
    /// Event payload.
    pub content: NotifyContent,
}

/// Payload of a [`NotifyArgs`] event. Only the fields relevant to the event
/// type are present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyContent {
    /// Editing session id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session_id: String,
    /// Version the session started from.
    #[serde(skip_serializing_if = "is_zero")]
    pub init_version: i32,
    /// Whether the session is read only.
    #[serde(skip_serializing_if = "is_false")]
    pub readonly: bool,
    /// Version produced by the last upload.
    #[serde(skip_serializing_if = "is_zero")]
    pub uploaded_version: i32,
    /// User id of the last modifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub last_modifier_id: String,
    /// Client connection id.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connection_id: String,
    /// User the event concerns.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    /// Permission granted to the connection.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub permission: String,
    /// Whether the event is a print.
    #[serde(skip_serializing_if = "is_false")]
    pub print: bool,
    /// Export format.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format: String,
}

/// Payload of operations without a natural result. Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Empty {}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_serializes_as_object() {
        assert_eq!(serde_json::to_value(Empty {}).unwrap(), json!({}));
    }

    #[test]
    fn test_file_info_wire_names() {
        let value = serde_json::to_value(FileInfo::new("f1", "doc", 1)).unwrap();
        assert_eq!(value["id"], "f1");
        assert_eq!(value["name"], "doc");
        assert_eq!(value["version"], 1);
        assert_eq!(value["create_time"], 0);
        assert_eq!(value["modifier_id"], "");
    }

    #[test]
    fn test_watermark_type_field() {
        let watermark = Watermark {
            watermark_type: 1,
            value: "confidential".to_string(),
            ..Watermark::default()
        };
        let value = serde_json::to_value(watermark).unwrap();
        assert_eq!(value["type"], 1);
        assert_eq!(value["value"], "confidential");
    }

    #[test]
    fn test_notify_args_partial_payload() {
        let args: NotifyArgs = serde_json::from_value(json!({
            "file_id": "f1",
            "type": "file_open",
            "content": {"session_id": "s1", "readonly": true}
        }))
        .unwrap();

        assert_eq!(args.event_type, "file_open");
        assert_eq!(args.content.session_id, "s1");
        assert!(args.content.readonly);
        assert_eq!(args.content.init_version, 0);

        let value = serde_json::to_value(&args).unwrap();
        assert_eq!(
            value,
            json!({"file_id": "f1", "type": "file_open", "content": {"session_id": "s1", "readonly": true}})
        );
    }

    #[test]
    fn test_rename_args_missing_name_defaults() {
        let args: RenameFileArgs = serde_json::from_str("{}").unwrap();
        assert_eq!(args.name, "");
    }
}
