// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — one reactive struct for the Dioxus UI.
//
// The state holds at most one active session; selecting a new conversion mode
// discards whatever the previous mode had loaded.

use std::path::PathBuf;

use pagesmith_core::{AppConfig, ConversionMode, ImageOrder, PageCursor};
use pagesmith_document::LoadedImage;
use pagesmith_document::preview::PagePreview;

/// Loaded Word document plus its paginated text preview.
#[derive(Debug, Clone)]
pub struct WordSession {
    pub source_path: PathBuf,
    pub file_name: String,
    /// Paragraphs as read from the file, in order.
    pub paragraphs: Vec<String>,
    /// Preview text split into canvas-sized chunks.
    pub preview_pages: Vec<String>,
    pub cursor: PageCursor,
}

/// Loaded image set plus its display permutation.
#[derive(Debug, Clone)]
pub struct ImageSession {
    pub images: Vec<LoadedImage>,
    pub order: ImageOrder,
}

/// Opened PDF plus crop inputs and the current page preview.
#[derive(Debug, Clone)]
pub struct CropSession {
    pub file_name: String,
    /// Raw bytes of the source PDF; re-parsed per operation.
    pub pdf_bytes: Vec<u8>,
    pub total_pages: u32,
    pub cursor: PageCursor,
    /// Raw text from the Start/End entry fields, validated on convert.
    pub start_input: String,
    pub end_input: String,
    /// Preview of the page under the cursor.
    pub preview: Option<PagePreview>,
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The active conversion mode, if any.
    pub mode: Option<ConversionMode>,
    /// Application settings.
    pub config: AppConfig,
    /// Status message for user feedback; one per completed or failed action.
    pub status_message: Option<String>,
    pub word: Option<WordSession>,
    pub images: Option<ImageSession>,
    pub crop: Option<CropSession>,
}

impl AppState {
    /// Switch the active mode, discarding every other mode's session.
    pub fn select_mode(&mut self, mode: ConversionMode) {
        if self.mode != Some(mode) {
            self.word = None;
            self.images = None;
            self.crop = None;
        }
        self.mode = Some(mode);
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_new_mode_discards_sessions() {
        let mut state = AppState::default();
        state.images = Some(ImageSession {
            images: Vec::new(),
            order: ImageOrder::new(0),
        });
        state.select_mode(ConversionMode::CropPdf);
        assert!(state.images.is_none());
        assert_eq!(state.mode, Some(ConversionMode::CropPdf));
    }

    #[test]
    fn reselecting_the_same_mode_keeps_the_session() {
        let mut state = AppState::default();
        state.select_mode(ConversionMode::ImagesToPdf);
        state.images = Some(ImageSession {
            images: Vec::new(),
            order: ImageOrder::new(3),
        });
        state.select_mode(ConversionMode::ImagesToPdf);
        assert!(state.images.is_some());
    }
}
