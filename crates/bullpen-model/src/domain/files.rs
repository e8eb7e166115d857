use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Entry kind in the workspace tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Dir,
}

/// One node of the sandboxed workspace tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub name: String,
    /// Path relative to the workspace root, `/`-separated.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub mtime: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

/// A bounded read of one workspace file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    pub content: String,
    /// True when the file was larger than the read cap.
    pub truncated: bool,
    /// Size on disk, not of `content`.
    pub size: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub mtime: Option<OffsetDateTime>,
}
