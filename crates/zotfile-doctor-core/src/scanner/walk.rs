use crate::error::Error;
use crate::normalize::NormalizedPath;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// A PDF found under the managed directory.
#[derive(Debug, Clone)]
pub struct ScannedPdf {
    pub key: NormalizedPath,
    /// Location on disk, spelled the way the filesystem returned it.
    pub path: PathBuf,
}

/// Lazily walk `root` and yield every `*.pdf` file below it. Symlinks are
/// not followed. Entries that cannot be read are logged and skipped.
pub fn iter_dir(root: &Path) -> Result<impl Iterator<Item = ScannedPdf> + '_, Error> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root).follow_links(false).min_depth(1);
    Ok(walker
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => scanned_pdf(root, entry),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                None
            }
        }))
}

fn scanned_pdf(root: &Path, entry: DirEntry) -> Option<ScannedPdf> {
    if entry.file_type().is_dir() || !entry.file_name().to_string_lossy().ends_with(".pdf") {
        return None;
    }
    let relative = entry.path().strip_prefix(root).ok()?;
    Some(ScannedPdf {
        key: NormalizedPath::from_relative(relative),
        path: entry.into_path(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn keys(root: &Path) -> Vec<String> {
        let mut keys: Vec<String> = iter_dir(root)
            .unwrap()
            .map(|pdf| pdf.key.as_str().to_string())
            .collect();
        keys.sort();
        keys
    }

    #[test]
    fn test_finds_nested_pdfs_only() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.pdf"), "x").unwrap();
        fs::write(root.join("a/b/deep.pdf"), "x").unwrap();
        fs::write(root.join("a/notes.txt"), "x").unwrap();
        fs::write(root.join("a/SHOUT.PDF"), "x").unwrap();
        fs::create_dir_all(root.join("folder.pdf")).unwrap();

        assert_eq!(keys(root), vec!["a/b/deep.pdf", "top.pdf"]);
    }

    #[test]
    fn test_keys_are_nfd_and_paths_are_real() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("Caf\u{e9}.pdf"), "x").unwrap();

        let found: Vec<ScannedPdf> = iter_dir(root).unwrap().collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key.as_str(), "Cafe\u{301}.pdf");
        assert!(found[0].path.exists());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(matches!(iter_dir(&missing), Err(Error::NotADirectory(_))));
    }
}
