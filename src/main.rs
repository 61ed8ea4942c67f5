mod cli;
mod commands;
mod fixes;
mod outline;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Backend, Cli};
use fixes::Corrections;
use pdf::{Native, PdfBackend, Pdftk};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "split failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let corrections = match &cli.corrections {
        Some(path) => Corrections::load(path)?,
        None => Corrections::default(),
    };
    let backend: Box<dyn PdfBackend> = match cli.backend {
        Backend::Pdftk => Box::new(Pdftk::new(&cli.pdf)),
        Backend::Native => Box::new(Native::open(&cli.pdf)?),
    };

    let entries = commands::plan(backend.as_ref(), &corrections)?;
    info!(entries = entries.len(), "resolved entries");

    let summary = commands::split::write_entries(
        backend.as_ref(),
        &entries,
        &cli.output_dir,
        cli.dry_run,
        &mut std::io::stdout().lock(),
    )?;
    info!(
        written = summary.written,
        skipped = summary.skipped,
        output_dir = %cli.output_dir.display(),
        "split completed"
    );

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
