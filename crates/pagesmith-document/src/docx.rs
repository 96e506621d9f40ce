// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word document reading for Pagesmith.
//
// Extracts paragraph text from .docx files using the `docx-rs` crate. Only the
// run text is kept — styling, tables, images, and headers are dropped, which
// is all the Word → PDF transcription needs.
//
// # Feature Gate
//
// This module is only available when the `docx` feature is enabled:
//
// ```toml
// pagesmith-document = { path = "crates/pagesmith-document", features = ["docx"] }
// ```
//
// Builds without the feature report `PagesmithError::DocxUnavailable` from the
// UI instead, so users get a "this build can't read Word files" message rather
// than a generic failure.

use std::path::Path;

use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild, read_docx};
use pagesmith_core::error::PagesmithError;
use tracing::{debug, info, instrument};

/// The paragraphs of a loaded .docx, in document order.
#[derive(Debug, Clone)]
pub struct WordDocument {
    paragraphs: Vec<String>,
    source_path: Option<String>,
}

impl WordDocument {
    /// Read a .docx from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagesmithError> {
        let path_ref = path.as_ref();
        info!("Opening Word document: {}", path_ref.display());

        let data = std::fs::read(path_ref)?;
        let mut doc = Self::from_bytes(&data)?;
        doc.source_path = Some(path_ref.display().to_string());
        Ok(doc)
    }

    /// Parse a .docx from raw bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PagesmithError> {
        let docx = read_docx(data)
            .map_err(|err| PagesmithError::DocxError(format!("failed to parse .docx: {}", err)))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
                _ => None,
            })
            .collect();

        debug!(paragraph_count = paragraphs.len(), "Word document parsed");

        Ok(Self {
            paragraphs,
            source_path: None,
        })
    }

    /// Paragraph texts in document order.
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// All paragraphs joined with newlines (used by the preview pane).
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Return the source path if the document was read via [`WordDocument::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }
}

/// Concatenate the run text of a paragraph, dropping everything else.
fn paragraph_text(para: &Paragraph) -> String {
    let mut out = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(text) = run_child {
                    out.push_str(&text.text);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};

    fn write_docx(path: &Path, paragraphs: &[&str]) {
        let file = std::fs::File::create(path).unwrap();
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        docx.build().pack(file).unwrap();
    }

    #[test]
    fn reads_paragraphs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.docx");
        write_docx(&path, &["First paragraph", "Second paragraph"]);

        let doc = WordDocument::open(&path).unwrap();
        assert_eq!(doc.paragraphs(), &["First paragraph", "Second paragraph"]);
        assert_eq!(doc.text(), "First paragraph\nSecond paragraph");
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = WordDocument::from_bytes(b"not a zip archive").unwrap_err();
        assert!(matches!(err, PagesmithError::DocxError(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WordDocument::open("/nonexistent/nope.docx").unwrap_err();
        assert!(matches!(err, PagesmithError::Io(_)));
    }
}
