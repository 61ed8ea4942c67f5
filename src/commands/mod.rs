pub mod split;

use crate::fixes::{fix_section, Corrections};
use crate::outline::hierarchy::select_section;
use crate::page_range::{resolve_ranges, ResolvedEntry};
use crate::pdf::PdfBackend;
use anyhow::Result;
use tracing::info;

/// Read the outline, correct the monsters section and resolve the page
/// range of every entry in it.
pub fn plan(backend: &dyn PdfBackend, corrections: &Corrections) -> Result<Vec<ResolvedEntry>> {
    let outline = backend.outline()?;
    info!(bookmarks = outline.records.len(), "read outline");

    let section = select_section(&outline, &corrections.section_prefix)?;
    info!(
        section = %section.node.title,
        first_page = section.node.page,
        last_page = section.last_page,
        "found monsters section"
    );

    let fixed = fix_section(section.node, corrections);
    Ok(resolve_ranges(&fixed.children, section.last_page))
}
