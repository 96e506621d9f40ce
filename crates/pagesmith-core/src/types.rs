// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Pagesmith PDF toolbox.

use serde::{Deserialize, Serialize};

use crate::error::{PagesmithError, Result};

/// The three conversion workflows the application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionMode {
    /// Transcribe a .docx into a plain-text PDF.
    WordToPdf,
    /// Combine a set of images into a multi-page PDF.
    ImagesToPdf,
    /// Extract a contiguous page range from an existing PDF.
    CropPdf,
}

impl ConversionMode {
    /// Short label used in page titles and status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WordToPdf => "Word → PDF",
            Self::ImagesToPdf => "Images → PDF",
            Self::CropPdf => "Crop PDF",
        }
    }
}

/// Standard paper sizes for generated PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// A 1-indexed, inclusive page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Check the range against a document's page count.
    ///
    /// A range is valid when `1 <= start <= end <= total`. Invalid ranges are
    /// rejected before any output is produced.
    pub fn validate(&self, total: u32) -> Result<()> {
        if self.start == 0 || self.start > self.end || self.end > total {
            return Err(PagesmithError::InvalidPageRange {
                start: self.start,
                end: self.end,
                total,
            });
        }
        Ok(())
    }

    /// Number of pages covered by the range.
    pub fn page_count(&self) -> u32 {
        self.end - self.start + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_is_valid() {
        assert!(PageRange::new(1, 10).validate(10).is_ok());
    }

    #[test]
    fn single_page_range_is_valid() {
        let range = PageRange::new(3, 3);
        assert!(range.validate(5).is_ok());
        assert_eq!(range.page_count(), 1);
    }

    #[test]
    fn zero_start_is_rejected() {
        assert!(PageRange::new(0, 2).validate(5).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(PageRange::new(4, 2).validate(5).is_err());
    }

    #[test]
    fn end_past_total_is_rejected() {
        assert!(PageRange::new(2, 6).validate(5).is_err());
    }
}
