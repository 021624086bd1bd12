use crate::cleanup::{self, CleanupOutcome};
use crate::config::AppConfig;
use crate::error::Error;
use crate::normalize::{lexical_resolve, NormalizedPath};
use crate::report::Reporter;
use crate::scanner;
use crate::storage::{self, Database};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{self, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Checks a managed directory against the attachment records of a database.
pub struct Doctor {
    config: AppConfig,
    db_path: PathBuf,
    directory: PathBuf,
}

/// Both sides of the comparison, each sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    /// In the database, not on disk.
    pub db_only: Vec<NormalizedPath>,
    /// On disk, not in the database.
    pub dir_only: Vec<NormalizedPath>,
    pub db_total: usize,
    pub dir_total: usize,
}

#[derive(Debug)]
pub struct RunSummary {
    pub comparison: ComparisonResult,
    /// `None` unless cleanup was requested and there was something to delete.
    pub cleanup: Option<CleanupOutcome>,
}

pub fn compare(
    db: &BTreeSet<NormalizedPath>,
    dir: &BTreeSet<NormalizedPath>,
) -> ComparisonResult {
    ComparisonResult {
        db_only: db.difference(dir).cloned().collect(),
        dir_only: dir.difference(db).cloned().collect(),
        db_total: db.len(),
        dir_total: dir.len(),
    }
}

impl Doctor {
    pub fn new(
        config: AppConfig,
        db_path: impl Into<PathBuf>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            db_path: db_path.into(),
            directory: directory.into(),
        }
    }

    /// Enumerate both sides, report the differences and, when `clean` is set,
    /// delete the files only found on disk and prune emptied directories.
    pub fn run(&self, clean: bool, reporter: &dyn Reporter) -> Result<RunSummary, Error> {
        let root = path::absolute(&self.directory)?;

        let start = Instant::now();
        let db_keys = self.collect_db(&root)?;
        let dir_files = collect_dir(&root)?;
        debug!(
            "Enumerated {} DB keys and {} files in {:.2}s",
            db_keys.len(),
            dir_files.len(),
            start.elapsed().as_secs_f64()
        );

        let dir_keys: BTreeSet<NormalizedPath> = dir_files.keys().cloned().collect();
        let comparison = compare(&db_keys, &dir_keys);
        info!(
            "{} missing on disk, {} missing in DB",
            comparison.db_only.len(),
            comparison.dir_only.len()
        );

        reporter.on_db_only(&comparison.db_only, comparison.db_total);
        reporter.on_dir_only(&comparison.dir_only, comparison.dir_total);

        if !clean || comparison.dir_only.is_empty() {
            return Ok(RunSummary {
                comparison,
                cleanup: None,
            });
        }

        reporter.on_cleanup_start();
        let targets: Vec<(NormalizedPath, PathBuf)> = comparison
            .dir_only
            .iter()
            .filter_map(|key| dir_files.get(key).map(|paths| (key, paths)))
            .flat_map(|(key, paths)| paths.iter().map(move |path| (key.clone(), path.clone())))
            .collect();
        let mut outcome = cleanup::unlink_orphans(&targets, reporter);

        outcome.pruned_dirs = cleanup::remove_empty_dirs(&root);
        reporter.on_prune_complete(outcome.pruned_dirs);

        Ok(RunSummary {
            comparison,
            cleanup: Some(outcome),
        })
    }

    fn collect_db(&self, root: &Path) -> Result<BTreeSet<NormalizedPath>, Error> {
        let db = Database::open(&self.db_path)?;
        let records = db.attachment_records(&self.config)?;
        let roots = root_spellings(root);
        debug!("Relating absolute attachment paths to {:?}", roots);
        let keys = storage::iter_db(&records, &roots, &self.config.relative_marker)
            .map(|key| NormalizedPath::new(key.as_str()))
            .collect();
        Ok(keys)
    }
}

/// Prefixes an absolute database path may use for the managed directory:
/// `..` collapsed, symlinks resolved, then the spelling as given.
fn root_spellings(root: &Path) -> Vec<PathBuf> {
    let mut spellings = vec![lexical_resolve(root)];
    if let Ok(canonical) = fs::canonicalize(root) {
        spellings.push(canonical);
    }
    spellings.push(root.to_path_buf());

    let mut unique: Vec<PathBuf> = Vec::with_capacity(spellings.len());
    for spelling in spellings {
        if !unique.contains(&spelling) {
            unique.push(spelling);
        }
    }
    unique
}

/// Key → real paths of every PDF under `root`. Names differing only in
/// Unicode composition share a key and are all kept.
fn collect_dir(root: &Path) -> Result<BTreeMap<NormalizedPath, Vec<PathBuf>>, Error> {
    let mut files: BTreeMap<NormalizedPath, Vec<PathBuf>> = BTreeMap::new();
    for pdf in scanner::iter_dir(root)? {
        files
            .entry(NormalizedPath::new(pdf.key.as_str()))
            .or_default()
            .push(pdf.path);
    }
    Ok(files)
}
