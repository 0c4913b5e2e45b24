//! [`DocumentLoader`] backed by `lopdf`.

use super::{DocumentLoader, FileInput, PageSource};
use crate::error::{Error, ExtractionFailure, Result};
use lopdf::Document;

/// Opens PDF files from memory with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfLoader;

impl DocumentLoader for LopdfLoader {
    fn load(&self, file: &FileInput) -> Result<Box<dyn PageSource>> {
        let doc = Document::load_mem(&file.data)
            .map_err(|e| Error::Extraction(ExtractionFailure::classify(&e.to_string())))?;

        if doc.is_encrypted() {
            return Err(Error::Extraction(ExtractionFailure::PasswordProtected));
        }

        let page_count = doc.get_pages().len() as u32;
        log::debug!("Opened {} (PDF {}, {} pages)", file.name, doc.version, page_count);
        Ok(Box::new(LopdfSource { doc, page_count }))
    }
}

struct LopdfSource {
    doc: Document,
    page_count: u32,
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let text = self
            .doc
            .extract_text(&[page])
            .map_err(|e| Error::Extraction(ExtractionFailure::Other(e.to_string())))?;
        Ok(text.trim_end().to_string())
    }
}
