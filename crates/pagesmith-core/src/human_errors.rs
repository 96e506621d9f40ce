// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The UI shows exactly one of these per failed action; nothing is retried
// automatically and the user can simply try the action again.

use crate::error::PagesmithError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must change their input (fix the range, pick a different file).
    ActionRequired,
    /// Cannot be fixed by changing input — damaged file, missing capability.
    Permanent,
    /// Worth trying the same action again.
    Transient,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `PagesmithError` into a `HumanError` suitable for the status line.
pub fn humanize_error(err: &PagesmithError) -> HumanError {
    match err {
        // -- PDF --
        PagesmithError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged. Try opening it in another viewer to check it works, or try a different file.".into(),
            severity: Severity::Permanent,
        },

        PagesmithError::InvalidPageRange { start, end, total } => HumanError {
            message: "That page range doesn't fit this document.".into(),
            suggestion: format!(
                "You asked for pages {start} to {end}, but the document has {total} pages. \
                 The start must be at least 1 and no later than the end."
            ),
            severity: Severity::ActionRequired,
        },

        // -- Images --
        PagesmithError::ImageError(_) => HumanError {
            message: "There's a problem with one of the images.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            severity: Severity::Permanent,
        },

        PagesmithError::NoImagesLoaded => HumanError {
            message: "No images are loaded.".into(),
            suggestion: "Choose one or more images first, then convert.".into(),
            severity: Severity::ActionRequired,
        },

        // -- Word documents --
        PagesmithError::DocxError(_) => HumanError {
            message: "This Word file couldn't be read.".into(),
            suggestion: "The file may be damaged or not a real .docx. Try re-saving it from your word processor.".into(),
            severity: Severity::Permanent,
        },

        PagesmithError::DocxUnavailable => HumanError {
            message: "This build can't read Word files.".into(),
            suggestion: "Please install a version of Pagesmith built with the 'docx' feature enabled.".into(),
            severity: Severity::Permanent,
        },

        // -- I/O --
        PagesmithError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Pagesmith doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_is_action_required() {
        let err = PagesmithError::InvalidPageRange {
            start: 4,
            end: 2,
            total: 10,
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("10 pages"));
    }

    #[test]
    fn missing_docx_support_names_the_feature() {
        let human = humanize_error(&PagesmithError::DocxUnavailable);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("docx"));
    }

    #[test]
    fn damaged_pdf_is_permanent() {
        let human = humanize_error(&PagesmithError::PdfError("bad xref".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn missing_file_is_action_required() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let human = humanize_error(&PagesmithError::Io(io));
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
