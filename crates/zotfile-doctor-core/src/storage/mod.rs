pub mod models;
pub mod queries;
pub mod sqlite;

pub use sqlite::Database;

use crate::normalize::NormalizedPath;
use models::AttachmentRecord;
use std::path::PathBuf;
use tracing::debug;

/// Comparison keys of the given records, dropping any the normalizer rejects.
pub fn iter_db<'a>(
    records: &'a [AttachmentRecord],
    roots: &'a [PathBuf],
    marker: &'a str,
) -> impl Iterator<Item = NormalizedPath> + 'a {
    records
        .iter()
        .filter_map(move |record| match record.normalized_path(roots, marker) {
            Ok(key) => Some(key),
            Err(reason) => {
                debug!(
                    "Skipping attachment {:?} (linkMode {:?}, {:?}): {}",
                    record.path, record.link_mode, record.content_type, reason
                );
                None
            }
        })
}
