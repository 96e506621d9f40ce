// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop PDF page — open a PDF, browse its pages, keep a 1-indexed range.

use dioxus::prelude::*;

use pagesmith_core::{ConversionMode, PageCursor, PageRange};
use pagesmith_document::PdfReader;
use pagesmith_document::preview::{PagePreview, pdf_page_preview};

use crate::pages::widgets::{
    ConvertButton, Pager, PrimaryButton, StatusLine, failure_message, png_data_uri,
};
use crate::state::{AppState, CropSession};

/// Re-parse the source bytes and preview one page. Failures only lose the
/// preview, never the session.
fn render_preview(pdf_bytes: &[u8], page_number: u32, area: (u32, u32)) -> Option<PagePreview> {
    let reader = match PdfReader::from_bytes(pdf_bytes) {
        Ok(reader) => reader,
        Err(err) => {
            tracing::warn!(%err, "Re-parsing PDF for preview failed");
            return None;
        }
    };
    match pdf_page_preview(&reader, page_number, area.0, area.1) {
        Ok(preview) => Some(preview),
        Err(err) => {
            tracing::warn!(page_number, %err, "Page preview failed");
            None
        }
    }
}

#[component]
pub fn Crop() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let session = state.read().crop.clone();
    let status = state.read().status_message.clone();
    let area = state.read().config.preview_area();
    let (area_w, area_h) = area;

    rsx! {
        div {
            h1 { "Crop PDF" }
            p { style: "color: #666;", "Keep an inclusive page range; pages are numbered from 1." }

            PrimaryButton {
                label: "Choose PDF File",
                disabled: false,
                onclick: move |_| {
                    state.write().select_mode(ConversionMode::CropPdf);

                    let Some(path) = rfd::FileDialog::new()
                        .add_filter("PDF Files", &["pdf"])
                        .pick_file()
                    else {
                        return;
                    };

                    let pdf_bytes = match std::fs::read(&path) {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            state.write().status_message =
                                Some(failure_message(&err.into()));
                            return;
                        }
                    };
                    let total_pages = match PdfReader::from_bytes(&pdf_bytes) {
                        Ok(reader) => reader.page_count(),
                        Err(err) => {
                            state.write().status_message =
                                Some(failure_message(&err));
                            return;
                        }
                    };

                    let file_name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "document.pdf".into());
                    let preview = render_preview(&pdf_bytes, 1, area);

                    tracing::info!(file = %file_name, total_pages, "PDF opened for cropping");

                    let mut st = state.write();
                    st.crop = Some(CropSession {
                        file_name: file_name.clone(),
                        pdf_bytes,
                        total_pages,
                        cursor: PageCursor::new(total_pages as usize),
                        start_input: "1".to_string(),
                        end_input: total_pages.to_string(),
                        preview,
                    });
                    st.status_message =
                        Some(format!("Opened {file_name} ({total_pages} pages)"));
                },
            }

            if let Some(ref crop) = session {
                h3 { "Preview — {crop.file_name}" }

                // Preview canvas: page text plus any embedded images.
                div {
                    style: "border: 1px solid #e0e0e0; border-radius: 8px; background: white; padding: 10px; width: {area_w}px; height: {area_h}px; overflow: hidden;",
                    if let Some(ref preview) = crop.preview {
                        pre {
                            style: "margin: 0; font-size: 10px; white-space: pre-wrap;",
                            "{preview.text}"
                        }
                        for png in preview.images.iter() {
                            img {
                                src: png_data_uri(png),
                                style: "max-width: 100%; max-height: 50%; display: block; margin: 4px auto;",
                            }
                        }
                    } else {
                        span { style: "color: #999;", "No preview available" }
                    }
                }

                Pager {
                    label: format!("Page {}/{}", crop.cursor.index() + 1, crop.total_pages),
                    at_start: crop.cursor.at_start(),
                    at_end: crop.cursor.at_end(),
                    onprev: move |_| {
                        let mut st = state.write();
                        if let Some(crop) = st.crop.as_mut()
                            && crop.cursor.prev()
                        {
                            let page = crop.cursor.index() as u32 + 1;
                            crop.preview = render_preview(&crop.pdf_bytes, page, area);
                        }
                    },
                    onnext: move |_| {
                        let mut st = state.write();
                        if let Some(crop) = st.crop.as_mut()
                            && crop.cursor.next()
                        {
                            let page = crop.cursor.index() as u32 + 1;
                            crop.preview = render_preview(&crop.pdf_bytes, page, area);
                        }
                    },
                }

                // Range entry, validated on convert.
                div { style: "display: flex; justify-content: center; gap: 16px; margin: 8px 0; align-items: center;",
                    label { style: "font-size: 14px; color: #333;",
                        "Start page: "
                        input {
                            style: "width: 60px; padding: 4px; border: 1px solid #ccc; border-radius: 4px;",
                            value: "{crop.start_input}",
                            oninput: move |evt| {
                                if let Some(crop) = state.write().crop.as_mut() {
                                    crop.start_input = evt.value();
                                }
                            },
                        }
                    }
                    label { style: "font-size: 14px; color: #333;",
                        "End page: "
                        input {
                            style: "width: 60px; padding: 4px; border: 1px solid #ccc; border-radius: 4px;",
                            value: "{crop.end_input}",
                            oninput: move |evt| {
                                if let Some(crop) = state.write().crop.as_mut() {
                                    crop.end_input = evt.value();
                                }
                            },
                        }
                    }
                }

                div { style: "text-align: center; margin-top: 8px;",
                    ConvertButton {
                        disabled: false,
                        onclick: move |_| {
                            let session = state.read().crop.clone();
                            let Some(session) = session else { return };

                            let parsed = session
                                .start_input
                                .trim()
                                .parse::<u32>()
                                .and_then(|s| Ok((s, session.end_input.trim().parse::<u32>()?)));
                            let Ok((start, end)) = parsed else {
                                state.write().status_message =
                                    Some("Page numbers must be whole numbers.".into());
                                return;
                            };

                            let range = PageRange::new(start, end);
                            if let Err(err) = range.validate(session.total_pages) {
                                state.write().status_message = Some(failure_message(&err));
                                return;
                            }

                            if let Some(out) = rfd::FileDialog::new()
                                .add_filter("PDF Files", &["pdf"])
                                .set_file_name("cropped.pdf")
                                .save_file()
                            {
                                let result = PdfReader::from_bytes(&session.pdf_bytes)
                                    .and_then(|reader| reader.crop_to_file(range, &out));
                                match result {
                                    Ok(()) => {
                                        tracing::info!(
                                            output = %out.display(),
                                            start, end,
                                            "Crop complete"
                                        );
                                        state.write().status_message =
                                            Some("PDF cropped successfully!".into());
                                    }
                                    Err(err) => {
                                        state.write().status_message =
                                            Some(failure_message(&err));
                                    }
                                }
                            }
                        },
                    }
                }
            }

            StatusLine { message: status }
        }
    }
}
