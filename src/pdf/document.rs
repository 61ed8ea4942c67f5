use crate::page_range::PageRange;
use anyhow::{Context, Result};
use lopdf::Document;
use std::path::Path;

pub struct PdfDocument {
    pub doc: Document,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfDocument { doc })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Copy of the document holding only the pages in `range`.
    pub fn extract_range(&self, range: PageRange) -> Result<Document> {
        // Validate range
        let total = self.page_count();
        if range.start == 0 || range.end > total {
            anyhow::bail!("Pages {} are out of range (1-{})", range, total);
        }

        // Clone the document and delete everything outside the range
        let mut new_doc = self.doc.clone();
        let pages_to_delete: Vec<u32> = (1..=total).filter(|&page| !range.contains(page)).collect();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
            // Drop objects only the deleted pages referenced
            new_doc.prune_objects();
        }

        Ok(new_doc)
    }

    /// Save to a file
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        doc.save(&path)
            .with_context(|| format!("Failed to save PDF: {}", path.as_ref().display()))?;
        Ok(())
    }
}
