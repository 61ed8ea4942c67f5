use super::PdfBackend;
use crate::outline::{dump::parse_dump_data, Outline};
use crate::page_range::PageRange;
use anyhow::{bail, Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Shells out to `pdftk` for both the outline dump and page extraction.
pub struct Pdftk {
    program: String,
    source: PathBuf,
}

impl Pdftk {
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        Pdftk {
            program: "pdftk".to_string(),
            source: source.as_ref().to_path_buf(),
        }
    }

    fn run(&self, args: &[&OsStr]) -> Result<Vec<u8>> {
        debug!(program = %self.program, ?args, "running");
        let output = Command::new(&self.program)
            .arg(&self.source)
            .args(args)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} returned non-zero exit status for {}: {}",
                self.program,
                self.source.display(),
                stderr.trim()
            );
        }
        Ok(output.stdout)
    }
}

impl PdfBackend for Pdftk {
    fn outline(&self) -> Result<Outline> {
        let stdout = self.run(&[OsStr::new("dump_data")])?;
        Ok(parse_dump_data(&String::from_utf8_lossy(&stdout)))
    }

    fn extract(&self, range: PageRange, output: &Path) -> Result<()> {
        let range = range.to_string();
        self.run(&[
            OsStr::new("cat"),
            OsStr::new(&range),
            OsStr::new("output"),
            output.as_os_str(),
        ])?;
        Ok(())
    }
}
