use crate::page_range::ResolvedEntry;
use crate::pdf::PdfBackend;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplitSummary {
    pub written: usize,
    pub skipped: usize,
}

/// `<output_dir>/<first letter>/<title>.pdf`
pub fn output_path(output_dir: &Path, title: &str) -> PathBuf {
    let file_name: String = title
        .chars()
        .map(|c| if c == '/' || c == '\0' { '-' } else { c })
        .collect();
    let letter = file_name
        .chars()
        .next()
        .map(String::from)
        .unwrap_or_else(|| "_".to_string());

    output_dir.join(letter).join(format!("{}.pdf", file_name))
}

/// Write one PDF per entry, never overwriting an existing file.
///
/// Every planned `path: start-end` line goes to `out`, including entries that
/// are skipped.
pub fn write_entries<W: Write>(
    backend: &dyn PdfBackend,
    entries: &[ResolvedEntry],
    output_dir: &Path,
    dry_run: bool,
    out: &mut W,
) -> Result<SplitSummary> {
    let mut summary = SplitSummary::default();

    for entry in entries {
        let path = output_path(output_dir, &entry.title);
        writeln!(out, "{}: {}", path.display(), entry.range)
            .with_context(|| "Failed to write planned operation")?;

        if path.exists() {
            warn!(path = %path.display(), "already exists, skipping");
            summary.skipped += 1;
            continue;
        }
        if dry_run {
            continue;
        }

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        backend
            .extract(entry.range, &path)
            .with_context(|| format!("Failed to extract \"{}\" ({})", entry.title, entry.range))?;
        summary.written += 1;
    }

    Ok(summary)
}
