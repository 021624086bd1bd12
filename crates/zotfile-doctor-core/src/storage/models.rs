use crate::normalize::{normalize_db_path, NormalizedPath, SkipReason};
use std::path::PathBuf;

/// The `path` column as found in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentPath {
    Text(String),
    /// SQL NULL.
    Missing,
    /// Integer, real, blob, or text that is not UTF-8.
    NotText,
}

/// One row of `itemAttachments` selected by the attachment filter.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub path: AttachmentPath,
    pub link_mode: Option<i64>,
    pub content_type: Option<String>,
}

impl AttachmentRecord {
    pub fn normalized_path(
        &self,
        roots: &[PathBuf],
        marker: &str,
    ) -> Result<NormalizedPath, SkipReason> {
        match &self.path {
            AttachmentPath::Text(raw) => normalize_db_path(raw, roots, marker),
            AttachmentPath::Missing => Err(SkipReason::Missing),
            AttachmentPath::NotText => Err(SkipReason::WrongType),
        }
    }
}
