use crate::normalize::NormalizedPath;
use crate::report::Reporter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// What a cleanup pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub unlinked: Vec<NormalizedPath>,
    pub failed: Vec<NormalizedPath>,
    pub pruned_dirs: usize,
}

/// Delete each target in order. A failure is reported for that file only
/// and the remaining targets are still attempted.
pub fn unlink_orphans(
    targets: &[(NormalizedPath, PathBuf)],
    reporter: &dyn Reporter,
) -> CleanupOutcome {
    let mut outcome = CleanupOutcome::default();

    for (key, path) in targets {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Unlinked {}", path.display());
                reporter.on_unlinked(key);
                outcome.unlinked.push(key.clone());
            }
            Err(err) => {
                warn!("Failed to unlink {}: {}", path.display(), err);
                reporter.on_unlink_failed(key, &err);
                outcome.failed.push(key.clone());
            }
        }
    }

    info!(
        "Unlinked {} files, {} failed",
        outcome.unlinked.len(),
        outcome.failed.len()
    );
    outcome
}

/// Remove every empty directory strictly below `root`, deepest first, so a
/// parent emptied by removing its children goes in the same pass. Failures
/// are ignored. Returns the number of directories removed.
pub fn remove_empty_dirs(root: &Path) -> usize {
    let mut removed = 0;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .contents_first(true);

    for entry in walker.into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_dir() {
            continue;
        }
        match fs::remove_dir(entry.path()) {
            Ok(()) => {
                debug!("Removed empty directory {}", entry.path().display());
                removed += 1;
            }
            Err(err) => trace!("Kept directory {}: {}", entry.path().display(), err),
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SilentReporter;
    use tempfile::tempdir;

    #[test]
    fn test_unlink_continues_past_failures() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.pdf"), "x").unwrap();
        fs::write(root.join("c.pdf"), "x").unwrap();

        let targets = vec![
            (NormalizedPath::new("a.pdf"), root.join("a.pdf")),
            (NormalizedPath::new("b.pdf"), root.join("b.pdf")),
            (NormalizedPath::new("c.pdf"), root.join("c.pdf")),
        ];
        let outcome = unlink_orphans(&targets, &SilentReporter);

        assert_eq!(
            outcome.unlinked,
            vec![NormalizedPath::new("a.pdf"), NormalizedPath::new("c.pdf")]
        );
        assert_eq!(outcome.failed, vec![NormalizedPath::new("b.pdf")]);
        assert!(!root.join("a.pdf").exists());
        assert!(!root.join("c.pdf").exists());
    }

    #[test]
    fn test_remove_empty_dirs_cascades_and_keeps_root() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("x/y/z")).unwrap();
        fs::create_dir_all(root.join("keep/empty")).unwrap();
        fs::write(root.join("keep/file.pdf"), "x").unwrap();

        let removed = remove_empty_dirs(root);

        assert_eq!(removed, 4);
        assert!(root.exists());
        assert!(!root.join("x").exists());
        assert!(root.join("keep/file.pdf").exists());
        assert!(!root.join("keep/empty").exists());
    }

    #[test]
    fn test_remove_empty_dirs_on_empty_root() {
        let tmp = tempdir().unwrap();
        assert_eq!(remove_empty_dirs(tmp.path()), 0);
        assert!(tmp.path().exists());
    }
}
