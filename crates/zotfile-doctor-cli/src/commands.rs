use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zotfile-doctor")]
#[command(about = "zotfile directory consistency checker", long_about = None)]
pub struct Cli {
    /// path-to-zotero/zotero.sqlite
    pub zotero_sqlite: PathBuf,
    /// zotfile directory
    pub zotfile_directory: PathBuf,
    /// Remove files in zotfile directory but not in DB
    #[arg(short, long)]
    pub clean: bool,
    /// Print plain text even when stdout is a terminal
    #[arg(long)]
    pub plain: bool,
    /// Configuration file overriding the attachment defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
