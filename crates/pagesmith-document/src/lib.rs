// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagesmith-document — Document processing for the Pagesmith PDF toolbox.
//
// Provides PDF operations (open, inspect, crop a page range), PDF creation
// (paragraph layout for Word conversion, one-image-per-page assembly), image
// loading with preview scaling, and the preview model (text pagination, PDF
// page text + embedded-image extraction).

pub mod image;
pub mod pdf;
pub mod preview;

#[cfg(feature = "docx")]
pub mod docx;

// Re-export the primary structs so callers can use `pagesmith_document::PdfReader` etc.
pub use image::loader::LoadedImage;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use preview::{PagePreview, paginate_text};

#[cfg(feature = "docx")]
pub use docx::WordDocument;
