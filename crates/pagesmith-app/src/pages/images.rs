// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Images → PDF page — pick images, reorder them with adjacent swaps, convert.

use dioxus::prelude::*;
use image::DynamicImage;

use pagesmith_core::{ConversionMode, ImageOrder};
use pagesmith_document::{LoadedImage, PdfWriter};

use crate::pages::widgets::{
    ConvertButton, Pager, PrimaryButton, StatusLine, failure_message, png_data_uri,
};
use crate::state::{AppState, ImageSession};

#[component]
pub fn Images() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let session = state.read().images.clone();
    let status = state.read().status_message.clone();
    let (area_w, area_h) = state.read().config.preview_area();

    // Preview of the image under the cursor, rendered as a data URI.
    let preview = session.as_ref().and_then(|imgs| {
        let idx = imgs.order.current()?;
        let img = &imgs.images[idx];
        match img.preview_png(area_w, area_h) {
            Ok(png) => Some((png_data_uri(&png), img.name().to_string())),
            Err(err) => {
                tracing::warn!(name = img.name(), %err, "Preview rendering failed");
                None
            }
        }
    });

    let has_images = session.as_ref().is_some_and(|s| !s.images.is_empty());

    rsx! {
        div {
            h1 { "Images → PDF" }
            p { style: "color: #666;", "Each image becomes one page, scaled to fit, never enlarged." }

            PrimaryButton {
                label: "Choose Images",
                disabled: false,
                onclick: move |_| {
                    state.write().select_mode(ConversionMode::ImagesToPdf);

                    let Some(paths) = rfd::FileDialog::new()
                        .add_filter("Image Files", &["jpg", "jpeg", "png"])
                        .pick_files()
                    else {
                        return;
                    };

                    // The first unreadable file aborts the whole selection.
                    let mut loaded = Vec::with_capacity(paths.len());
                    for path in &paths {
                        match LoadedImage::open(path) {
                            Ok(img) => loaded.push(img),
                            Err(err) => {
                                tracing::warn!(path = %path.display(), %err, "Image load failed");
                                state.write().status_message = Some(failure_message(&err));
                                return;
                            }
                        }
                    }

                    let count = loaded.len();
                    tracing::info!(count, "Images loaded");

                    let mut st = state.write();
                    st.images = Some(ImageSession {
                        order: ImageOrder::new(count),
                        images: loaded,
                    });
                    st.status_message = Some(format!("Loaded {count} images"));
                },
            }

            if let Some(ref imgs) = session {
                // Preview canvas
                div {
                    style: "border: 1px solid #e0e0e0; border-radius: 8px; background: white; padding: 10px; width: {area_w}px; height: {area_h}px; display: flex; align-items: center; justify-content: center;",
                    if let Some((ref uri, ref name)) = preview {
                        img {
                            src: "{uri}",
                            alt: "{name}",
                            style: "max-width: 100%; max-height: 100%;",
                        }
                    } else {
                        span { style: "color: #999;", "No preview available" }
                    }
                }

                Pager {
                    label: format!(
                        "Image {}/{}",
                        imgs.order.cursor().index() + 1,
                        imgs.order.len()
                    ),
                    at_start: imgs.order.cursor().at_start(),
                    at_end: imgs.order.cursor().at_end(),
                    onprev: move |_| {
                        if let Some(imgs) = state.write().images.as_mut() {
                            imgs.order.prev();
                        }
                    },
                    onnext: move |_| {
                        if let Some(imgs) = state.write().images.as_mut() {
                            imgs.order.next();
                        }
                    },
                }

                // Reorder controls: swap the current image with a neighbour.
                div { style: "display: flex; justify-content: center; gap: 12px; margin: 8px 0;",
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| {
                            if let Some(imgs) = state.write().images.as_mut() {
                                imgs.order.move_up();
                            }
                        },
                        "↑ Move Up"
                    }
                    button {
                        style: "padding: 8px 16px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| {
                            if let Some(imgs) = state.write().images.as_mut() {
                                imgs.order.move_down();
                            }
                        },
                        "↓ Move Down"
                    }
                }

                div { style: "text-align: center; margin-top: 8px;",
                    ConvertButton {
                        disabled: !has_images,
                        onclick: move |_| {
                            let session = state.read().images.clone();
                            let Some(session) = session else { return };

                            if let Some(out) = rfd::FileDialog::new()
                                .add_filter("PDF Files", &["pdf"])
                                .set_file_name("images.pdf")
                                .save_file()
                            {
                                let paper = state.read().config.paper_size;
                                let ordered: Vec<&DynamicImage> = session
                                    .order
                                    .apply(&session.images)
                                    .into_iter()
                                    .map(|img| img.as_dynamic())
                                    .collect();
                                let writer = PdfWriter::new(paper);
                                match writer.write_images_to_file(&ordered, &out) {
                                    Ok(()) => {
                                        tracing::info!(output = %out.display(), "Image conversion complete");
                                        state.write().status_message =
                                            Some("Images converted to PDF successfully!".into());
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
