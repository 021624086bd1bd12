use colored::*;
use std::cell::RefCell;
use std::io::{self, Write};
use tracing::warn;
use zotfile_doctor_core::{NormalizedPath, Reporter};

/// Colored terminal reporter. Uses the plain wording for the report itself,
/// and also shows the io error behind a failed unlink and how many empty
/// directories were pruned.
pub struct StyledReporter<W: Write> {
    out: RefCell<W>,
}

impl StyledReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StyledReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn line(&self, text: String) {
        if let Err(err) = writeln!(self.out.borrow_mut(), "{}", text) {
            warn!("Failed to write report: {}", err);
        }
    }
}

fn count(n: usize) -> ColoredString {
    if n == 0 {
        n.to_string().green()
    } else {
        n.to_string().red().bold()
    }
}

fn quoted(path: &NormalizedPath) -> ColoredString {
    format!("\"{}\"", path).cyan()
}

impl<W: Write> Reporter for StyledReporter<W> {
    fn on_db_only(&self, missing: &[NormalizedPath], db_total: usize) {
        self.line(format!(
            "There were {}/{} files in DB but not in zotfile directory:",
            count(missing.len()),
            db_total
        ));
        for path in missing {
            self.line(format!("  - {}", quoted(path)));
        }
    }

    fn on_dir_only(&self, orphans: &[NormalizedPath], dir_total: usize) {
        self.line(format!(
            "\nThere were {}/{} files in zotfile directory but not in DB:",
            count(orphans.len()),
            dir_total
        ));
        for path in orphans {
            self.line(format!("  - {}", quoted(path)));
        }
    }

    fn on_cleanup_start(&self) {
        self.line(String::new());
    }

    fn on_unlinked(&self, path: &NormalizedPath) {
        self.line(format!("{} {}", "Unlinked".green(), quoted(path)));
    }

    fn on_unlink_failed(&self, path: &NormalizedPath, err: &io::Error) {
        self.line(format!(
            "{} {} {}",
            "Failed to unlink".red().bold(),
            quoted(path),
            format!("({})", err).dimmed()
        ));
    }

    fn on_prune_complete(&self, removed_dirs: usize) {
        if removed_dirs > 0 {
            self.line(
                format!("Removed {} empty directories", removed_dirs)
                    .dimmed()
                    .to_string(),
            );
        }
    }
}
