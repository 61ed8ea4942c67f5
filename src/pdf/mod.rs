pub mod document;
pub mod pdftk;
pub mod toc;

pub use document::PdfDocument;
pub use pdftk::Pdftk;

use crate::outline::Outline;
use crate::page_range::PageRange;
use anyhow::Result;
use std::path::Path;

/// The two things the splitter needs from a PDF toolkit.
pub trait PdfBackend {
    /// Flat bookmark outline of the source document.
    fn outline(&self) -> Result<Outline>;

    /// Write the pages of `range` from the source document to `output`.
    fn extract(&self, range: PageRange, output: &Path) -> Result<()>;
}

/// In-process backend built on lopdf. Loads the document once.
pub struct Native {
    document: PdfDocument,
}

impl Native {
    pub fn open<P: AsRef<Path>>(source: P) -> Result<Self> {
        Ok(Native {
            document: PdfDocument::open(source)?,
        })
    }
}

impl PdfBackend for Native {
    fn outline(&self) -> Result<Outline> {
        Ok(Outline {
            records: toc::outline_records(&self.document.doc)?,
            page_count: Some(self.document.page_count()),
        })
    }

    fn extract(&self, range: PageRange, output: &Path) -> Result<()> {
        let mut new_doc = self.document.extract_range(range)?;
        PdfDocument::save(&mut new_doc, output)
    }
}
