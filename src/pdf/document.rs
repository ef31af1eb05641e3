use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = get_string_from_dict(dict, b"Title");
                info.author = get_string_from_dict(dict, b"Author");
                info.creator = get_string_from_dict(dict, b"Creator");
                info.producer = get_string_from_dict(dict, b"Producer");
                info.creation_date = get_string_from_dict(dict, b"CreationDate");
                info.mod_date = get_string_from_dict(dict, b"ModDate");
                info.subject = get_string_from_dict(dict, b"Subject");
                info.keywords = get_string_from_dict(dict, b"Keywords");
            }
        }

        info.page_count = self.page_count();
        info
    }

    /// Build a new document holding only `page` (1-indexed).
    ///
    /// Every other page is deleted from a clone of the source and objects no
    /// longer reachable from the trailer are dropped, so the output does not
    /// carry the content streams of the removed pages.
    pub fn extract_page(&self, page: u32) -> Result<Document> {
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        if page == 0 || page > total {
            anyhow::bail!("Page {} is out of range (1-{})", page, total);
        }

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .map(|(num, _)| *num)
            .filter(|num| *num != page)
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();

        let remaining = new_doc.get_pages().len();
        if remaining != 1 {
            anyhow::bail!(
                "Page {} could not be isolated ({} pages left after extraction)",
                page,
                remaining
            );
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

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        // PDFDocEncoding, approximated as Latin-1
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
