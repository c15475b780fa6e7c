use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use super::PdfError;

/// What the extractor needs from one PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfContents {
    pub page_count: usize,
    /// Text of all pages, concatenated in page order.
    pub text: String,
    /// URIs of link annotations, in page order.
    pub annotation_uris: Vec<String>,
}

pub trait PdfReader {
    fn read(&self, path: &Path) -> Result<PdfContents, PdfError>;
}

/// Pure-Rust reader backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfReader;

impl PdfReader for LopdfReader {
    fn read(&self, path: &Path) -> Result<PdfContents, PdfError> {
        let doc = Document::load(path)?;
        let pages = doc.get_pages();

        let mut text = String::new();
        let mut annotation_uris = Vec::new();
        for (&number, &page_id) in &pages {
            match doc.extract_text(&[number]) {
                Ok(t) => text.push_str(&t),
                Err(e) => debug!(page = number, error = %e, "no extractable text"),
            }
            annotation_uris.extend(page_link_uris(&doc, page_id));
        }

        Ok(PdfContents {
            page_count: pages.len(),
            text,
            annotation_uris,
        })
    }
}

fn page_link_uris(doc: &Document, page_id: ObjectId) -> Vec<String> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };
    let Some(annots) = page
        .get(b"Annots")
        .ok()
        .and_then(|o| resolve(doc, o))
        .and_then(|o| o.as_array().ok())
    else {
        return Vec::new();
    };

    annots
        .iter()
        .filter_map(|a| resolve(doc, a)?.as_dict().ok())
        .filter_map(|annot| {
            let action = resolve(doc, annot.get(b"A").ok()?)?.as_dict().ok()?;
            let uri = resolve(doc, action.get(b"URI").ok()?)?.as_str().ok()?;
            Some(String::from_utf8_lossy(uri).into_owned())
        })
        .filter(|uri| !uri.is_empty())
        .collect()
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    doc.dereference(obj).ok().map(|(_, o)| o)
}
