// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image loading — decode images from disk or memory, keep them alongside a
// display name, and produce aspect-fit PNG previews. Uses the `image` crate.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use pagesmith_core::error::PagesmithError;
use tracing::{debug, info, instrument};

/// A decoded image together with the name shown in the UI.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    name: String,
    image: DynamicImage,
}

impl LoadedImage {
    // -- Construction ---------------------------------------------------------

    /// Decode an image from a file path. The display name is the file name.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PagesmithError> {
        let path_ref = path.as_ref();
        let image = image::open(path_ref).map_err(|err| {
            PagesmithError::ImageError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        let name = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_ref.display().to_string());

        info!(
            name = %name,
            width = image.width(),
            height = image.height(),
            "Image loaded"
        );
        Ok(Self { name, image })
    }

    /// Decode an image from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(name, data_len = data.len()))]
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self, PagesmithError> {
        let image = image::load_from_memory(data).map_err(|err| {
            PagesmithError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(
            width = image.width(),
            height = image.height(),
            "Image decoded from bytes"
        );
        Ok(Self {
            name: name.into(),
            image,
        })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    // -- Preview --------------------------------------------------------------

    /// Scale the image to fit within `max_w` x `max_h` (preserving aspect
    /// ratio) and encode it as PNG for the preview canvas.
    #[instrument(skip(self), fields(max_w, max_h))]
    pub fn preview_png(&self, max_w: u32, max_h: u32) -> Result<Vec<u8>, PagesmithError> {
        let scaled = self
            .image
            .resize(max_w, max_h, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = scaled.width(),
            new_h = scaled.height(),
            "Preview scaled"
        );
        encode_png(&scaled)
    }
}

/// Encode a `DynamicImage` as PNG bytes.
pub(crate) fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, PagesmithError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| PagesmithError::ImageError(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([0, 128, 255])));
        encode_png(&img).unwrap()
    }

    #[test]
    fn decodes_from_bytes() {
        let loaded = LoadedImage::from_bytes("blue.png", &png_bytes(8, 6)).unwrap();
        assert_eq!(loaded.name(), "blue.png");
        assert_eq!((loaded.width(), loaded.height()), (8, 6));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = LoadedImage::from_bytes("bad", b"not an image").unwrap_err();
        assert!(matches!(err, PagesmithError::ImageError(_)));
    }

    #[test]
    fn preview_fits_within_canvas() {
        let loaded = LoadedImage::from_bytes("wide.png", &png_bytes(200, 50)).unwrap();
        let png = loaded.preview_png(100, 100).unwrap();

        let preview = image::load_from_memory(&png).unwrap();
        assert!(preview.width() <= 100 && preview.height() <= 100);
        // Aspect ratio preserved: 200x50 fit into 100x100 is 100x25.
        assert_eq!((preview.width(), preview.height()), (100, 25));
    }

    #[test]
    fn open_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        std::fs::write(&path, png_bytes(4, 4)).unwrap();

        let loaded = LoadedImage::open(&path).unwrap();
        assert_eq!(loaded.name(), "sample.png");
        assert_eq!(loaded.width(), 4);
    }
}
