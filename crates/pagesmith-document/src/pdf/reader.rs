// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect existing PDF documents and crop a contiguous
// page range into a new PDF, using the `lopdf` crate.

use std::path::Path;

use lopdf::{Document, Object, ObjectId, dictionary};
use pagesmith_core::error::PagesmithError;
use pagesmith_core::types::PageRange;
use tracing::{debug, info, instrument, warn};

/// Reads existing PDF files and extracts page ranges from them.
///
/// Wraps `lopdf::Document`. Cropping deep-clones each selected page and every
/// object it references into a fresh document, so the output stands alone and
/// the source is never modified.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagesmithError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            PagesmithError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PagesmithError> {
        let document = Document::load_mem(data).map_err(|err| {
            PagesmithError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Text content of a single page (1-indexed), for the preview pane.
    pub fn page_text(&self, page_number: u32) -> Result<String, PagesmithError> {
        self.document.extract_text(&[page_number]).map_err(|err| {
            PagesmithError::PdfError(format!(
                "failed to extract text from page {}: {}",
                page_number, err
            ))
        })
    }

    /// Borrow the underlying lopdf document (used by the preview module).
    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    // -- Cropping -------------------------------------------------------------

    /// Copy the pages in `range` (1-indexed, inclusive) into a new PDF,
    /// preserving their order and content, and return its serialised bytes.
    ///
    /// The range is validated against the page count before any output is
    /// produced; an out-of-bounds or inverted range yields
    /// [`PagesmithError::InvalidPageRange`].
    #[instrument(skip(self), fields(start = range.start, end = range.end))]
    pub fn crop(&self, range: PageRange) -> Result<Vec<u8>, PagesmithError> {
        let total = self.page_count();
        range.validate(total)?;

        info!(start = range.start, end = range.end, total, "Cropping PDF");

        let pages = self.document.get_pages();
        let mut new_doc = empty_document();

        for page_num in range.start..=range.end {
            let page_id = *pages.get(&page_num).ok_or_else(|| {
                PagesmithError::PdfError(format!("page {} not found in page tree", page_num))
            })?;
            copy_page_into(&self.document, &mut new_doc, page_id)?;
        }

        let mut output = Vec::new();
        new_doc.save_to(&mut output).map_err(|err| {
            PagesmithError::PdfError(format!("failed to serialise cropped PDF: {}", err))
        })?;

        debug!(
            pages = range.page_count(),
            output_bytes = output.len(),
            "Crop complete"
        );
        Ok(output)
    }

    /// Crop a page range and write the result directly to a file.
    pub fn crop_to_file(
        &self,
        range: PageRange,
        path: impl AsRef<Path>,
    ) -> Result<(), PagesmithError> {
        let bytes = self.crop(range)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote cropped PDF to {}", path.as_ref().display());
        Ok(())
    }
}

/// A document with a catalog and an empty page tree, ready for
/// [`copy_page_into`] to append pages to.
fn empty_document() -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Object::Array(Vec::new()),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Copy a single page object (and its referenced resources) from `source` into
/// `target`, appending it as the last page.
///
/// Stream data, fonts, and images referenced by the page dictionary are copied
/// as new objects in the target document.
fn copy_page_into(
    source: &Document,
    target: &mut Document,
    page_id: ObjectId,
) -> Result<(), PagesmithError> {
    let page_object = source.get_object(page_id).map_err(|err| {
        PagesmithError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
    })?;

    // Deep-clone the page object and all objects it transitively references.
    let cloned_object = clone_object_tree(source, target, page_object)?;
    let cloned_id = target.add_object(cloned_object);

    // Retrieve the target's page tree root (/Pages) and append the new page.
    let pages_id = target
        .catalog()
        .map_err(|err| PagesmithError::PdfError(format!("no catalog: {}", err)))
        .and_then(|catalog| {
            catalog
                .get(b"Pages")
                .map_err(|err| PagesmithError::PdfError(format!("no /Pages: {}", err)))
                .and_then(|pages_ref| match pages_ref {
                    Object::Reference(id) => Ok(*id),
                    _ => Err(PagesmithError::PdfError(
                        "/Pages is not a reference".to_string(),
                    )),
                })
        })?;

    // Add page reference to the /Kids array and bump /Count.
    if let Ok(Object::Dictionary(pages_dict)) = target.get_object_mut(pages_id) {
        if let Ok(Object::Array(kids)) = pages_dict.get_mut(b"Kids") {
            kids.push(Object::Reference(cloned_id));
        }
        if let Ok(count_obj) = pages_dict.get_mut(b"Count")
            && let Object::Integer(count) = count_obj
        {
            *count += 1;
        }
    }

    // Point the cloned page's /Parent at the target's /Pages node.
    if let Ok(Object::Dictionary(page_dict)) = target.get_object_mut(cloned_id) {
        page_dict.set("Parent", Object::Reference(pages_id));
    }

    Ok(())
}

/// Deep-clone a single lopdf Object, recursively resolving references.
///
/// /Parent is deliberately skipped to avoid circular cloning through the page
/// tree back-reference; the caller patches it afterwards. Unresolvable
/// references degrade to Null rather than failing the whole crop.
fn clone_object_tree(
    source: &Document,
    target: &mut Document,
    object: &Object,
) -> Result<Object, PagesmithError> {
    match object {
        Object::Dictionary(dict) => {
            let mut new_dict = lopdf::Dictionary::new();
            for (key, value) in dict.iter() {
                if key == b"Parent" {
                    continue;
                }
                let cloned_value = clone_object_tree(source, target, value)?;
                new_dict.set(key.clone(), cloned_value);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let mut new_arr = Vec::with_capacity(arr.len());
            for item in arr {
                new_arr.push(clone_object_tree(source, target, item)?);
            }
            Ok(Object::Array(new_arr))
        }
        Object::Reference(ref_id) => match source.get_object(*ref_id) {
            Ok(referenced) => {
                let cloned = clone_object_tree(source, target, referenced)?;
                let new_id = target.add_object(cloned);
                Ok(Object::Reference(new_id))
            }
            Err(err) => {
                warn!(?ref_id, %err, "Cannot resolve reference, using Null");
                Ok(Object::Null)
            }
        },
        Object::Stream(stream) => {
            let mut new_dict = lopdf::Dictionary::new();
            for (key, value) in stream.dict.iter() {
                if key == b"Parent" {
                    continue;
                }
                let cloned_value = clone_object_tree(source, target, value)?;
                new_dict.set(key.clone(), cloned_value);
            }
            Ok(Object::Stream(lopdf::Stream::new(
                new_dict,
                stream.content.clone(),
            )))
        }
        // Boolean, Integer, Real, String, Name, Null are trivially cloneable.
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::sample_pdf_bytes;

    #[test]
    fn page_count_matches_source() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(4)).unwrap();
        assert_eq!(reader.page_count(), 4);
    }

    #[test]
    fn crop_rejects_inverted_range() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(3)).unwrap();
        let err = reader.crop(PageRange::new(3, 1)).unwrap_err();
        assert!(matches!(
            err,
            PagesmithError::InvalidPageRange {
                start: 3,
                end: 1,
                total: 3
            }
        ));
    }

    #[test]
    fn crop_rejects_zero_start() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(3)).unwrap();
        assert!(reader.crop(PageRange::new(0, 2)).is_err());
    }

    #[test]
    fn crop_rejects_end_past_last_page() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(3)).unwrap();
        assert!(reader.crop(PageRange::new(1, 4)).is_err());
    }

    #[test]
    fn full_range_crop_preserves_page_count() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(3)).unwrap();
        let cropped = reader.crop(PageRange::new(1, 3)).unwrap();
        assert_eq!(PdfReader::from_bytes(&cropped).unwrap().page_count(), 3);
    }

    #[test]
    fn crop_keeps_selected_pages_in_order() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(5)).unwrap();
        let cropped = reader.crop(PageRange::new(2, 4)).unwrap();

        let result = PdfReader::from_bytes(&cropped).unwrap();
        assert_eq!(result.page_count(), 3);
        assert!(result.page_text(1).unwrap().contains("Page 2"));
        assert!(result.page_text(2).unwrap().contains("Page 3"));
        assert!(result.page_text(3).unwrap().contains("Page 4"));
    }

    #[test]
    fn single_page_crop_equals_source_page() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(5)).unwrap();
        let cropped = reader.crop(PageRange::new(3, 3)).unwrap();

        let result = PdfReader::from_bytes(&cropped).unwrap();
        assert_eq!(result.page_count(), 1);
        assert_eq!(
            result.page_text(1).unwrap().trim(),
            reader.page_text(3).unwrap().trim()
        );
    }

    #[test]
    fn crop_to_file_writes_a_loadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cropped.pdf");

        let reader = PdfReader::from_bytes(&sample_pdf_bytes(2)).unwrap();
        reader.crop_to_file(PageRange::new(1, 1), &out).unwrap();

        let reloaded = PdfReader::open(&out).unwrap();
        assert_eq!(reloaded.page_count(), 1);
    }
}
