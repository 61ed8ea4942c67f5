use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bestiary-split")]
#[command(about = "Split a bestiary PDF into one file per monster using its bookmarks")]
#[command(version)]
pub struct Cli {
    /// Bestiary PDF to split
    pub pdf: PathBuf,

    /// Directory receiving one sub-directory per initial letter
    pub output_dir: PathBuf,

    /// Toolkit used to read bookmarks and extract pages
    #[arg(long, value_enum, default_value_t = Backend::Pdftk)]
    pub backend: Backend,

    /// JSON file replacing the built-in correction tables
    #[arg(long)]
    pub corrections: Option<PathBuf>,

    /// Print the planned files without writing anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Backend {
    /// Run the external `pdftk` tool
    Pdftk,
    /// Read and write the PDF in-process
    Native,
}
