// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Paper size for all generated PDFs.
    pub paper_size: crate::PaperSize,
    /// Preview canvas width in pixels.
    pub preview_width: u32,
    /// Preview canvas height in pixels.
    pub preview_height: u32,
    /// Preview font size in pixels, used to paginate text previews.
    pub preview_font_px: u32,
}

impl AppConfig {
    /// Drawing area inside the preview canvas (the canvas keeps a 10px inset
    /// on each side).
    pub fn preview_area(&self) -> (u32, u32) {
        (
            self.preview_width.saturating_sub(20),
            self.preview_height.saturating_sub(20),
        )
    }

    /// How many text lines fit on one preview page.
    pub fn preview_lines_per_page(&self) -> usize {
        let (_, area_h) = self.preview_area();
        // Line height is the font size plus 2px of leading.
        (area_h / (self.preview_font_px + 2)).max(1) as usize
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::A4,
            preview_width: 600,
            preview_height: 500,
            preview_font_px: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preview_area_matches_canvas_inset() {
        let config = AppConfig::default();
        assert_eq!(config.preview_area(), (580, 480));
    }

    #[test]
    fn lines_per_page_is_never_zero() {
        let config = AppConfig {
            preview_height: 4,
            ..AppConfig::default()
        };
        assert_eq!(config.preview_lines_per_page(), 1);
    }
}
