// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagesmith.

use thiserror::Error;

/// Top-level error type for all Pagesmith operations.
#[derive(Debug, Error)]
pub enum PagesmithError {
    // -- PDF errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("invalid page range {start}..={end} for a {total} page document")]
    InvalidPageRange { start: u32, end: u32, total: u32 },

    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("no images loaded")]
    NoImagesLoaded,

    // -- Word document errors --
    #[error("Word document error: {0}")]
    DocxError(String),

    #[error("this build has no Word document support")]
    DocxUnavailable,

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagesmithError>;
