mod commands;
mod logging;
mod styled;

use anyhow::Context;
use clap::Parser;
use commands::Cli;
use console::Term;
use dotenv::dotenv;
use styled::StyledReporter;
use tracing::{debug, info};
use zotfile_doctor_core::config::load_configuration;
use zotfile_doctor_core::{Doctor, PlainReporter, Reporter};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let config = load_configuration(args.config.as_deref())
        .context("Error loading configuration")?;
    debug!("Configuration: {:?}", config);

    let reporter: Box<dyn Reporter> = if args.plain || !Term::stdout().is_term() {
        Box::new(PlainReporter::stdout())
    } else {
        Box::new(StyledReporter::stdout())
    };

    let doctor = Doctor::new(config, &args.zotero_sqlite, &args.zotfile_directory);
    let summary = doctor.run(args.clean, reporter.as_ref()).with_context(|| {
        format!(
            "Error checking '{}' against '{}'",
            args.zotfile_directory.display(),
            args.zotero_sqlite.display()
        )
    })?;

    if let Some(cleanup) = &summary.cleanup {
        info!(
            "{} unlinked, {} failed, {} empty directories removed",
            cleanup.unlinked.len(),
            cleanup.failed.len(),
            cleanup.pruned_dirs
        );
    }

    Ok(())
}
