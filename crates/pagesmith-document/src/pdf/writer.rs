// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — create new PDF documents from Word paragraphs or images using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use image::DynamicImage;
use pagesmith_core::PaperSize;
use pagesmith_core::error::PagesmithError;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Left/right/top/bottom page margin for text layout, in points.
const TEXT_MARGIN_PT: f32 = 40.0;
/// Vertical distance between consecutive text lines, in points.
const LINE_HEIGHT_PT: f32 = 20.0;
/// Font size for transcribed paragraphs, in points.
const FONT_SIZE_PT: f32 = 12.0;

/// Images are embedded at 72 DPI so one image pixel maps to one PDF point,
/// which makes the fit-to-page arithmetic exact.
const IMAGE_DPI: f32 = 72.0;

/// Creates new PDF documents from paragraph text or raster images.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Word paragraphs to PDF -----------------------------------------------

    /// Create a PDF transcribing `paragraphs` as left-aligned Helvetica lines.
    ///
    /// Each paragraph becomes one or more wrapped lines; layout flows top to
    /// bottom and breaks to a new page when the bottom margin is reached.
    /// This is a lossy plain-text transcription — no styling is preserved.
    #[instrument(skip(self, paragraphs), fields(paragraph_count = paragraphs.len()))]
    pub fn paragraphs_to_pdf(&self, paragraphs: &[String]) -> Result<Vec<u8>, PagesmithError> {
        let title = self.title.as_deref().unwrap_or("Pagesmith Document");
        info!(paper = ?self.paper_size, title, "Creating text PDF");

        let mut doc = PdfDocument::new(title);
        let pages = self.layout_text_pages(paragraphs);

        debug!(pages = pages.len(), "Text layout complete");
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    /// Lay paragraphs out into pages of text operations.
    fn layout_text_pages(&self, paragraphs: &[String]) -> Vec<PdfPage> {
        let (page_w, page_h) = self.page_dimensions();
        let page_h_pt = page_h.into_pt().0;
        let usable_width_pt = page_w.into_pt().0 - 2.0 * TEXT_MARGIN_PT;

        // Approximate characters per line: the average Helvetica glyph is
        // roughly half the font size wide.
        let avg_char_width_pt = 0.50 * FONT_SIZE_PT;
        let max_chars_per_line = (usable_width_pt / avg_char_width_pt) as usize;

        let lines: Vec<String> = paragraphs
            .iter()
            .flat_map(|para| wrap_text(para, max_chars_per_line))
            .collect();

        let usable_height_pt = page_h_pt - 2.0 * TEXT_MARGIN_PT;
        let lines_per_page = (usable_height_pt / LINE_HEIGHT_PT).max(1.0) as usize;

        let mut pages: Vec<PdfPage> = Vec::new();
        let mut line_iter = lines.iter().peekable();

        while line_iter.peek().is_some() {
            let mut ops: Vec<Op> = Vec::new();
            let mut line_idx: usize = 0;

            while line_idx < lines_per_page {
                let line = match line_iter.next() {
                    Some(l) => l,
                    None => break,
                };

                let y_pt = page_h_pt - TEXT_MARGIN_PT - (line_idx as f32 * LINE_HEIGHT_PT);

                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(TEXT_MARGIN_PT),
                        y: Pt(y_pt),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(FONT_SIZE_PT),
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(line.clone())],
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::EndTextSection);

                line_idx += 1;
            }

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // An empty document still yields a single blank page.
        if pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        pages
    }

    // -- Images to PDF --------------------------------------------------------

    /// Create a multi-page PDF with one page per image, in slice order.
    ///
    /// Each image is converted to RGB, scaled to fit the page (preserving
    /// aspect ratio, never upscaled) and centred on the white page background.
    /// The first failing image aborts the whole operation.
    #[instrument(skip(self, images), fields(image_count = images.len()))]
    pub fn images_to_pdf(&self, images: &[&DynamicImage]) -> Result<Vec<u8>, PagesmithError> {
        if images.is_empty() {
            return Err(PagesmithError::NoImagesLoaded);
        }

        let title = self.title.as_deref().unwrap_or("Pagesmith Images");
        info!(paper = ?self.paper_size, count = images.len(), "Creating image PDF");

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::with_capacity(images.len());

        for image in images {
            pages.push(self.image_page(&mut doc, image));
        }

        debug!(pages = pages.len(), "Image layout complete");
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        Ok(doc.save(&PdfSaveOptions::default(), &mut warnings))
    }

    /// Build one page holding `image` scaled to fit and centred.
    fn image_page(&self, doc: &mut PdfDocument, image: &DynamicImage) -> PdfPage {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        let rgb = image.to_rgb8();
        let (img_w, img_h) = rgb.dimensions();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_w as usize,
            height: img_h as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        // At 72 DPI one pixel is one point. Fit the longest side to the page
        // and keep smaller images at their natural size.
        let scale = (page_w_pt / img_w as f32)
            .min(page_h_pt / img_h as f32)
            .min(1.0);

        let rendered_w_pt = img_w as f32 * scale;
        let rendered_h_pt = img_h as f32 * scale;
        let x_offset = (page_w_pt - rendered_w_pt) / 2.0;
        let y_offset = (page_h_pt - rendered_h_pt) / 2.0;

        debug!(img_w, img_h, scale, "Image placed on page");

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x_offset)),
                translate_y: Some(Pt(y_offset)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                rotate: None,
            },
        }];

        PdfPage::new(page_w, page_h, ops)
    }

    // -- File output convenience ----------------------------------------------

    /// Transcribe paragraphs to a PDF file.
    pub fn write_paragraphs_to_file(
        &self,
        paragraphs: &[String],
        path: impl AsRef<Path>,
    ) -> Result<(), PagesmithError> {
        let bytes = self.paragraphs_to_pdf(paragraphs)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote text PDF to {}", path.as_ref().display());
        Ok(())
    }

    /// Assemble images into a PDF file.
    pub fn write_images_to_file(
        &self,
        images: &[&DynamicImage],
        path: impl AsRef<Path>,
    ) -> Result<(), PagesmithError> {
        let bytes = self.images_to_pdf(images)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote image PDF to {}", path.as_ref().display());
        Ok(())
    }
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a paragraph so that no line exceeds `max_width` characters.
///
/// Widths are counted in characters, not bytes, so multi-byte text (CJK
/// paragraphs have no whitespace at all) wraps instead of panicking on a
/// mid-character slice. Words longer than `max_width` are force-broken.
/// An empty paragraph yields one empty line so vertical spacing survives.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![String::new()];
    }

    let mut result = Vec::new();
    let mut current_line = String::with_capacity(max_width);
    let mut current_chars = 0usize;

    for word in words {
        let word_chars = word.chars().count();
        if word_chars > max_width {
            if !current_line.is_empty() {
                result.push(current_line.clone());
                current_line.clear();
                current_chars = 0;
            }
            // Force-break the oversized word on character boundaries.
            for ch in word.chars() {
                current_line.push(ch);
                current_chars += 1;
                if current_chars == max_width {
                    result.push(current_line.clone());
                    current_line.clear();
                    current_chars = 0;
                }
            }
        } else if current_line.is_empty() {
            current_line.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            result.push(current_line.clone());
            current_line.clear();
            current_line.push_str(word);
            current_chars = word_chars;
        }
    }

    if !current_line.is_empty() {
        result.push(current_line);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, image::Rgb([200, 10, 10])))
    }

    #[test]
    fn wrap_keeps_short_lines_intact() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap_text("alpha beta gamma", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn wrap_force_breaks_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_breaks_multibyte_words_on_char_boundaries() {
        let lines = wrap_text(&"あ".repeat(10), 4);
        assert_eq!(lines, vec!["ああああ", "ああああ", "ああ"]);
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        // 11 characters, 13 bytes: must still fit on one line.
        assert_eq!(wrap_text("héllo wörld", 11), vec!["héllo wörld"]);
    }

    #[test]
    fn cjk_paragraph_converts_without_panicking() {
        let writer = PdfWriter::a4();
        let bytes = writer.paragraphs_to_pdf(&["あ".repeat(200)]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn empty_paragraph_keeps_a_blank_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn empty_document_yields_one_blank_page() {
        let writer = PdfWriter::a4();
        let pages = writer.layout_text_pages(&[]);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn few_paragraphs_fit_one_page() {
        let writer = PdfWriter::a4();
        let paragraphs: Vec<String> = (0..5).map(|i| format!("paragraph {i}")).collect();
        assert_eq!(writer.layout_text_pages(&paragraphs).len(), 1);
    }

    #[test]
    fn overflow_starts_a_new_page() {
        // A4 with 40pt margins at 20pt line height fits 38 lines per page.
        let writer = PdfWriter::a4();
        let paragraphs: Vec<String> = (0..39).map(|i| format!("line {i}")).collect();
        assert_eq!(writer.layout_text_pages(&paragraphs).len(), 2);
    }

    #[test]
    fn one_page_per_image() {
        let writer = PdfWriter::a4();
        let images = [solid_image(30, 20), solid_image(1000, 2000)];
        let refs: Vec<&DynamicImage> = images.iter().collect();

        let mut doc = PdfDocument::new("test");
        let pages: Vec<PdfPage> = refs
            .iter()
            .map(|img| writer.image_page(&mut doc, img))
            .collect();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn emitted_pdf_has_one_page_per_image_in_display_order() {
        use crate::pdf::reader::PdfReader;
        use pagesmith_core::ImageOrder;

        let images = [
            solid_image(10, 10),
            solid_image(20, 20),
            solid_image(30, 30),
        ];
        let mut order = ImageOrder::new(3);
        order.move_down(); // display order [1, 0, 2]

        let refs = order.apply(&images);
        assert_eq!(
            refs.iter().map(|img| img.width()).collect::<Vec<_>>(),
            vec![20, 10, 30]
        );

        let writer = PdfWriter::a4();
        let bytes = writer.images_to_pdf(&refs).unwrap();
        let reloaded = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reloaded.page_count(), 3);
    }

    #[test]
    fn no_images_is_rejected() {
        let writer = PdfWriter::a4();
        let err = writer.images_to_pdf(&[]).unwrap_err();
        assert!(matches!(err, PagesmithError::NoImagesLoaded));
    }

    #[test]
    fn image_pdf_bytes_look_like_a_pdf() {
        let writer = PdfWriter::a4();
        let img = solid_image(10, 10);
        let bytes = writer.images_to_pdf(&[&img]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
