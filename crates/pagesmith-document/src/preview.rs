// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview model — text pagination for Word previews and per-page PDF previews
// (page text plus embedded raster images).
//
// Embedded image extraction is deliberately shallow: only DCTDecode (JPEG) and
// FlateDecode (raw RGB) XObjects are decoded; anything else is skipped with a
// warning. A preview failure on one image never fails the page.

use image::DynamicImage;
use lopdf::{Document, Object};
use pagesmith_core::error::PagesmithError;
use tracing::{debug, instrument, warn};

use crate::image::loader::encode_png;
use crate::pdf::reader::PdfReader;

/// What the preview pane shows for one PDF page.
#[derive(Debug, Clone)]
pub struct PagePreview {
    /// 1-indexed page number this preview was built from.
    pub page_number: u32,
    /// Total pages in the document, for the "Page x/y" label.
    pub total_pages: u32,
    /// Extracted page text (an explanatory string when extraction fails).
    pub text: String,
    /// Embedded images, PNG-encoded and scaled to fit the preview canvas.
    pub images: Vec<Vec<u8>>,
}

/// Split text into fixed-height preview pages of `lines_per_page` lines each.
///
/// Always returns at least one page so the preview pane has something to show.
pub fn paginate_text(text: &str, lines_per_page: usize) -> Vec<String> {
    let per_page = lines_per_page.max(1);
    let lines: Vec<&str> = text.split('\n').collect();

    let pages: Vec<String> = lines
        .chunks(per_page)
        .map(|chunk| chunk.join("\n"))
        .collect();

    if pages.is_empty() {
        vec![String::new()]
    } else {
        pages
    }
}

/// Build the preview for one page of an open PDF.
///
/// Text extraction failures degrade to an explanatory string; embedded-image
/// failures are skipped. Only a page number outside the document is an error.
#[instrument(skip(reader), fields(page_number, max_w, max_h))]
pub fn pdf_page_preview(
    reader: &PdfReader,
    page_number: u32,
    max_w: u32,
    max_h: u32,
) -> Result<PagePreview, PagesmithError> {
    let total_pages = reader.page_count();
    if page_number == 0 || page_number > total_pages {
        return Err(PagesmithError::PdfError(format!(
            "page {} out of range (document has {} pages)",
            page_number, total_pages
        )));
    }

    let text = match reader.page_text(page_number) {
        Ok(text) => text,
        Err(err) => {
            warn!(page_number, %err, "Text extraction failed");
            format!("Error extracting text: {err}")
        }
    };

    let images = extract_page_images(reader.document(), page_number, max_w, max_h);
    debug!(
        page_number,
        text_len = text.len(),
        image_count = images.len(),
        "Page preview built"
    );

    Ok(PagePreview {
        page_number,
        total_pages,
        text,
        images,
    })
}

/// Decode the page's /XObject images into preview PNGs. Unsupported filters
/// and broken streams are skipped.
fn extract_page_images(doc: &Document, page_number: u32, max_w: u32, max_h: u32) -> Vec<Vec<u8>> {
    let pages = doc.get_pages();
    let Some(&page_id) = pages.get(&page_number) else {
        return Vec::new();
    };

    let Some(xobjects) = doc
        .get_object(page_id)
        .ok()
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|page| page.get(b"Resources").ok())
        .and_then(|res| resolve(doc, res))
        .and_then(|res| res.as_dict().ok())
        .and_then(|res| res.get(b"XObject").ok())
        .and_then(|xo| resolve(doc, xo))
        .and_then(|xo| xo.as_dict().ok())
    else {
        return Vec::new();
    };

    let mut previews = Vec::new();
    for (name, entry) in xobjects.iter() {
        let Some(Object::Stream(stream)) = resolve(doc, entry) else {
            continue;
        };
        let is_image = stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|s| s.as_name().ok())
            .is_some_and(|subtype| subtype == b"Image");
        if !is_image {
            continue;
        }

        match decode_embedded_image(stream) {
            Ok(image) => {
                let scaled = image.resize(max_w, max_h, image::imageops::FilterType::Lanczos3);
                match encode_png(&scaled) {
                    Ok(png) => previews.push(png),
                    Err(err) => {
                        warn!(name = %String::from_utf8_lossy(name), %err, "Preview encoding failed, skipping");
                    }
                }
            }
            Err(err) => {
                warn!(name = %String::from_utf8_lossy(name), %err, "Cannot decode embedded image, skipping");
            }
        }
    }
    previews
}

/// Decode an image XObject stream. Handles DCTDecode (JPEG data verbatim) and
/// FlateDecode (deflated raw 8-bit RGB samples sized by /Width and /Height).
fn decode_embedded_image(stream: &lopdf::Stream) -> Result<DynamicImage, PagesmithError> {
    match primary_filter(&stream.dict).as_deref() {
        Some(b"DCTDecode") => image::load_from_memory(&stream.content)
            .map_err(|err| PagesmithError::ImageError(format!("JPEG decode failed: {}", err))),
        Some(b"FlateDecode") => {
            let width = dict_u32(&stream.dict, b"Width")?;
            let height = dict_u32(&stream.dict, b"Height")?;
            let data = stream.decompressed_content().map_err(|err| {
                PagesmithError::ImageError(format!("stream inflate failed: {}", err))
            })?;

            let expected = width as usize * height as usize * 3;
            if data.len() != expected {
                return Err(PagesmithError::ImageError(format!(
                    "raw image layout not supported: {} bytes for {}x{} RGB",
                    data.len(),
                    width,
                    height
                )));
            }

            image::RgbImage::from_raw(width, height, data)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| PagesmithError::ImageError("raw RGB buffer mismatch".into()))
        }
        Some(other) => Err(PagesmithError::ImageError(format!(
            "unsupported image filter: {}",
            String::from_utf8_lossy(other)
        ))),
        None => Err(PagesmithError::ImageError(
            "image stream has no filter".into(),
        )),
    }
}

/// Follow reference chains to the pointed-at object. Gives up after a fixed
/// depth to stay safe on cyclic documents.
fn resolve<'a>(doc: &'a Document, mut object: &'a Object) -> Option<&'a Object> {
    let mut depth = 0;
    while let Object::Reference(id) = object {
        if depth > 16 {
            return None;
        }
        object = doc.get_object(*id).ok()?;
        depth += 1;
    }
    Some(object)
}

/// The first /Filter name of a stream, if any.
fn primary_filter(dict: &lopdf::Dictionary) -> Option<Vec<u8>> {
    match dict.get(b"Filter").ok()? {
        Object::Name(name) => Some(name.clone()),
        Object::Array(filters) => filters
            .first()
            .and_then(|f| f.as_name().ok())
            .map(|n| n.to_vec()),
        _ => None,
    }
}

/// Numeric dictionary entry as u32.
fn dict_u32(dict: &lopdf::Dictionary, key: &[u8]) -> Result<u32, PagesmithError> {
    dict.get(key)
        .ok()
        .and_then(|v| v.as_i64().ok())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            PagesmithError::ImageError(format!(
                "image stream missing /{}",
                String::from_utf8_lossy(key)
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::test_support::sample_pdf_bytes;
    use lopdf::content::{Content, Operation};
    use lopdf::{Stream, dictionary};

    #[test]
    fn pagination_splits_into_fixed_chunks() {
        let text = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let pages = paginate_text(&text, 4);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], "1\n2\n3\n4");
        assert_eq!(pages[2], "9\n10");
    }

    #[test]
    fn empty_text_still_has_one_page() {
        let pages = paginate_text("", 10);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0], "");
    }

    #[test]
    fn zero_lines_per_page_is_clamped() {
        let pages = paginate_text("a\nb", 0);
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn text_page_preview_carries_page_text() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(3)).unwrap();
        let preview = pdf_page_preview(&reader, 2, 580, 480).unwrap();
        assert_eq!(preview.page_number, 2);
        assert_eq!(preview.total_pages, 3);
        assert!(preview.text.contains("Page 2"));
        assert!(preview.images.is_empty());
    }

    #[test]
    fn out_of_range_page_is_rejected() {
        let reader = PdfReader::from_bytes(&sample_pdf_bytes(2)).unwrap();
        assert!(pdf_page_preview(&reader, 0, 580, 480).is_err());
        assert!(pdf_page_preview(&reader, 3, 580, 480).is_err());
    }

    /// One-page PDF whose only content is an image XObject with the given
    /// stream dictionary extras and content bytes.
    fn image_pdf(filter: &str, width: u32, height: u32, content_bytes: Vec<u8>) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => filter,
            },
            content_bytes,
        ));
        let resources_id = doc.add_object(dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        (width as i64).into(),
                        0.into(),
                        0.into(),
                        (height as i64).into(),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn jpeg_xobject_is_extracted() {
        // Encode a small JPEG to embed as DCTDecode data.
        let rgb = image::RgbImage::from_pixel(6, 4, image::Rgb([10, 200, 30]));
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();

        let pdf = image_pdf("DCTDecode", 6, 4, jpeg);
        let reader = PdfReader::from_bytes(&pdf).unwrap();
        let preview = pdf_page_preview(&reader, 1, 580, 480).unwrap();

        assert_eq!(preview.images.len(), 1);
        // The preview is a decodable PNG.
        assert!(image::load_from_memory(&preview.images[0]).is_ok());
    }

    #[test]
    fn unsupported_filter_is_skipped() {
        let pdf = image_pdf("JBIG2Decode", 6, 4, vec![0u8; 16]);
        let reader = PdfReader::from_bytes(&pdf).unwrap();
        let preview = pdf_page_preview(&reader, 1, 580, 480).unwrap();
        assert!(preview.images.is_empty());
    }
}
