use super::models::{AttachmentPath, AttachmentRecord};
use super::sqlite::Database;
use crate::config::AppConfig;
use rusqlite::types::ValueRef;
use rusqlite::{params, Result};
use tracing::debug;

// No parentheses around the OR: the stored link mode is selected whatever
// its content type, the linked one only for PDFs.
const ATTACHMENT_QUERY: &str = "SELECT path, linkMode, contentType FROM itemAttachments \
     WHERE linkMode = ?1 OR linkMode = ?2 AND contentType = ?3";

impl Database {
    /// All attachment rows matching the link mode / content type filter.
    pub fn attachment_records(&self, config: &AppConfig) -> Result<Vec<AttachmentRecord>> {
        let mut stmt = self.connection().prepare(ATTACHMENT_QUERY)?;
        let records = stmt
            .query_map(
                params![
                    config.stored_link_mode,
                    config.linked_link_mode,
                    config.pdf_content_type
                ],
                |row| {
                    Ok(AttachmentRecord {
                        path: attachment_path(row.get_ref(0)?),
                        link_mode: match row.get_ref(1)? {
                            ValueRef::Integer(mode) => Some(mode),
                            _ => None,
                        },
                        content_type: text(row.get_ref(2)?),
                    })
                },
            )?
            .collect::<Result<Vec<_>>>()?;

        debug!("{} attachment records selected", records.len());
        Ok(records)
    }
}

fn attachment_path(value: ValueRef<'_>) -> AttachmentPath {
    match value {
        ValueRef::Null => AttachmentPath::Missing,
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(path) => AttachmentPath::Text(path.to_owned()),
            Err(_) => AttachmentPath::NotText,
        },
        _ => AttachmentPath::NotText,
    }
}

fn text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_owned),
        _ => None,
    }
}
