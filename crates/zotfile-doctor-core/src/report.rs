use crate::normalize::NormalizedPath;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use tracing::warn;

/// Output side of a run.
///
/// The engine calls these in order: both discrepancy lists, then, only when
/// cleanup runs, one call per deletion and a final prune summary.
/// All methods default to no-ops.
pub trait Reporter {
    fn on_db_only(&self, _missing: &[NormalizedPath], _db_total: usize) {}
    fn on_dir_only(&self, _orphans: &[NormalizedPath], _dir_total: usize) {}
    fn on_cleanup_start(&self) {}
    fn on_unlinked(&self, _path: &NormalizedPath) {}
    fn on_unlink_failed(&self, _path: &NormalizedPath, _err: &io::Error) {}
    fn on_prune_complete(&self, _removed_dirs: usize) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Plain-text reporter, used whenever no styled formatter is configured.
pub struct PlainReporter<W: Write> {
    out: RefCell<W>,
}

impl PlainReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> PlainReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, args: fmt::Arguments<'_>) {
        let mut out = self.out.borrow_mut();
        if let Err(err) = out.write_fmt(args).and_then(|_| out.write_all(b"\n")) {
            warn!("Failed to write report: {}", err);
        }
    }
}

impl<W: Write> Reporter for PlainReporter<W> {
    fn on_db_only(&self, missing: &[NormalizedPath], db_total: usize) {
        self.line(format_args!(
            "There were {}/{} files in DB but not in zotfile directory:",
            missing.len(),
            db_total
        ));
        for path in missing {
            self.line(format_args!("  - \"{}\"", path));
        }
    }

    fn on_dir_only(&self, orphans: &[NormalizedPath], dir_total: usize) {
        self.line(format_args!(
            "\nThere were {}/{} files in zotfile directory but not in DB:",
            orphans.len(),
            dir_total
        ));
        for path in orphans {
            self.line(format_args!("  - \"{}\"", path));
        }
    }

    fn on_cleanup_start(&self) {
        self.line(format_args!(""));
    }

    fn on_unlinked(&self, path: &NormalizedPath) {
        self.line(format_args!("Unlinked \"{}\"", path));
    }

    fn on_unlink_failed(&self, path: &NormalizedPath, _err: &io::Error) {
        self.line(format_args!("Failed to unlink \"{}\"", path));
    }
}
