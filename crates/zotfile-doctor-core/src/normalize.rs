use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Comparison key for an attachment: relative to the managed directory,
/// `/`-separated, without empty or `.` segments, in Unicode NFD.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Canonicalize a relative path string. Already normalized input is
    /// returned unchanged.
    pub fn new(raw: &str) -> Self {
        let joined = raw
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        NormalizedPath(joined.nfd().collect())
    }

    pub fn from_relative(path: &Path) -> Self {
        Self::new(&path.to_string_lossy())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a database path was left out of the comparison.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("not a PDF")]
    NotPdf,
    #[error("no path stored")]
    Missing,
    #[error("path is not text")]
    WrongType,
    #[error("path lies outside the managed directory")]
    OutsideRoot,
    #[error("path is not a valid host path")]
    Malformed,
}

/// Collapse `.` and `..` components without touching the filesystem.
/// `..` directly below the root stays at the root.
pub fn lexical_resolve(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match resolved.components().next_back() {
                Some(Component::Normal(_)) => {
                    resolved.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => resolved.push(".."),
            },
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Turn a path as stored in the database into a comparison key.
///
/// Paths containing `marker` are relative to the managed directory already;
/// all other paths must lie lexically under one of `roots`, the spellings of
/// the managed directory tried in order.
pub fn normalize_db_path(
    raw: &str,
    roots: &[PathBuf],
    marker: &str,
) -> Result<NormalizedPath, SkipReason> {
    if !raw.to_lowercase().ends_with(".pdf") {
        return Err(SkipReason::NotPdf);
    }
    if raw.contains('\0') {
        return Err(SkipReason::Malformed);
    }

    let normalized = if !marker.is_empty() && raw.contains(marker) {
        NormalizedPath::new(&raw.replace(marker, ""))
    } else {
        let relative = roots
            .iter()
            .find_map(|root| Path::new(raw).strip_prefix(root).ok())
            .ok_or(SkipReason::OutsideRoot)?;
        NormalizedPath::from_relative(relative)
    };

    if normalized.is_empty() {
        return Err(SkipReason::Malformed);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "attachments:";

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["papers/foo.pdf", "a//b/./c.pdf", "Caf\u{e9}/x.pdf", "dir\\sub\\y.pdf"] {
            let once = NormalizedPath::new(raw);
            let twice = NormalizedPath::new(once.as_str());
            assert_eq!(once, twice, "not a fixed point for {:?}", raw);
        }
    }

    #[test]
    fn test_composition_forms_collapse() {
        let composed = NormalizedPath::new("Caf\u{e9}/G\u{f6}del.pdf");
        let decomposed = NormalizedPath::new("Cafe\u{301}/Go\u{308}del.pdf");
        assert_eq!(composed, decomposed);
        assert_eq!(composed.as_str(), "Cafe\u{301}/Go\u{308}del.pdf");
    }

    #[test]
    fn test_separator_styles_collapse() {
        assert_eq!(
            NormalizedPath::new("papers\\2020\\foo.pdf"),
            NormalizedPath::new("papers/2020/foo.pdf")
        );
        assert_eq!(NormalizedPath::new("./papers//foo.pdf/").as_str(), "papers/foo.pdf");
    }

    #[test]
    fn test_relative_marker_is_stripped() {
        let key = normalize_db_path("attachments:papers/foo.pdf", &[], MARKER).unwrap();
        assert_eq!(key.as_str(), "papers/foo.pdf");
    }

    #[test]
    fn test_absolute_path_under_root() {
        let key = normalize_db_path(
            "/home/user/Zotero/papers/bar.pdf",
            &[PathBuf::from("/home/user/Zotero")],
            MARKER,
        )
        .unwrap();
        assert_eq!(key.as_str(), "papers/bar.pdf");
    }

    #[test]
    fn test_root_prefix_must_match_whole_components() {
        let result = normalize_db_path(
            "/home/user/Zotero2/bar.pdf",
            &[PathBuf::from("/home/user/Zotero")],
            MARKER,
        );
        assert_eq!(result, Err(SkipReason::OutsideRoot));
    }

    #[test]
    fn test_absolute_path_outside_root_is_skipped() {
        let roots = [PathBuf::from("/home/user/Zotero")];
        assert_eq!(
            normalize_db_path("/mnt/other/bar.pdf", &roots, MARKER),
            Err(SkipReason::OutsideRoot)
        );
        assert_eq!(
            normalize_db_path("/mnt/other/bar.pdf", &[], MARKER),
            Err(SkipReason::OutsideRoot)
        );
    }

    #[test]
    fn test_extension_check_ignores_case() {
        assert!(normalize_db_path("attachments:UPPER.PDF", &[], MARKER).is_ok());
        assert_eq!(
            normalize_db_path("attachments:notes.txt", &[], MARKER),
            Err(SkipReason::NotPdf)
        );
        assert_eq!(
            normalize_db_path("attachments:archive.pdf.zip", &[], MARKER),
            Err(SkipReason::NotPdf)
        );
    }

    #[test]
    fn test_nul_byte_is_malformed() {
        assert_eq!(
            normalize_db_path("attachments:bad\0name.pdf", &[], MARKER),
            Err(SkipReason::Malformed)
        );
    }

    #[test]
    fn test_root_itself_is_malformed() {
        let roots = [PathBuf::from("/data/root.pdf")];
        assert_eq!(
            normalize_db_path("/data/root.pdf", &roots, MARKER),
            Err(SkipReason::Malformed)
        );
    }

    #[test]
    fn test_later_root_spelling_is_tried() {
        let roots = [PathBuf::from("/home/user/link"), PathBuf::from("/srv/zotero")];
        let key = normalize_db_path("/srv/zotero/a/b.pdf", &roots, MARKER).unwrap();
        assert_eq!(key.as_str(), "a/b.pdf");
    }

    #[test]
    fn test_lexical_resolve_collapses_parent_dirs() {
        assert_eq!(
            lexical_resolve(Path::new("/home/user/work/../Zotero/./papers")),
            PathBuf::from("/home/user/Zotero/papers")
        );
        assert_eq!(lexical_resolve(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(lexical_resolve(Path::new("../a/../b")), PathBuf::from("../b"));
    }
}
