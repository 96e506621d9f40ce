// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word → PDF page — pick a .docx, preview its text page by page, convert.

use dioxus::prelude::*;

use pagesmith_core::ConversionMode;
use pagesmith_document::PdfWriter;

use crate::pages::widgets::{ConvertButton, Pager, PrimaryButton, StatusLine};
use crate::state::AppState;

#[component]
pub fn Word() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let session = state.read().word.clone();
    let status = state.read().status_message.clone();

    rsx! {
        div {
            h1 { "Word → PDF" }
            p { style: "color: #666;", "Transcribes paragraphs as plain text. Styling is not preserved." }

            PrimaryButton {
                label: "Choose Word File",
                disabled: false,
                onclick: move |_| {
                    state.write().select_mode(ConversionMode::WordToPdf);

                    #[cfg(feature = "docx")]
                    {
                        use pagesmith_core::PageCursor;
                        use pagesmith_document::{WordDocument, paginate_text};
                        use crate::pages::widgets::failure_message;
                        use crate::state::WordSession;

                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Word Files", &["docx"])
                            .pick_file()
                        {
                            match WordDocument::open(&path) {
                                Ok(doc) => {
                                    let lines_per_page =
                                        state.read().config.preview_lines_per_page();
                                    let preview_pages =
                                        paginate_text(&doc.text(), lines_per_page);
                                    let page_count = preview_pages.len();
                                    let file_name = path
                                        .file_name()
                                        .map(|n| n.to_string_lossy().to_string())
                                        .unwrap_or_else(|| "document.docx".into());

                                    tracing::info!(
                                        file = %file_name,
                                        paragraphs = doc.paragraphs().len(),
                                        preview_pages = page_count,
                                        "Word document opened"
                                    );

                                    let mut st = state.write();
                                    st.word = Some(WordSession {
                                        source_path: path,
                                        file_name: file_name.clone(),
                                        paragraphs: doc.paragraphs().to_vec(),
                                        preview_pages,
                                        cursor: PageCursor::new(page_count),
                                    });
                                    st.status_message =
                                        Some(format!("Opened {file_name} ({page_count} preview pages)"));
                                }
                                Err(err) => {
                                    state.write().status_message =
                                        Some(failure_message(&err));
                                }
                            }
                        }
                    }
                    #[cfg(not(feature = "docx"))]
                    {
                        use crate::pages::widgets::failure_message;
                        use pagesmith_core::PagesmithError;

                        state.write().status_message =
                            Some(failure_message(&PagesmithError::DocxUnavailable));
                    }
                },
            }

            if let Some(ref word) = session {
                h3 { "Preview — {word.file_name}" }

                // Preview canvas
                pre {
                    style: "border: 1px solid #e0e0e0; border-radius: 8px; background: white; padding: 10px; width: 580px; height: 480px; overflow: hidden; font-size: 10px; white-space: pre-wrap;",
                    "{word.preview_pages[word.cursor.index()]}"
                }

                Pager {
                    label: format!("Page {}/{}", word.cursor.index() + 1, word.cursor.len()),
                    at_start: word.cursor.at_start(),
                    at_end: word.cursor.at_end(),
                    onprev: move |_| {
                        if let Some(word) = state.write().word.as_mut() {
                            word.cursor.prev();
                        }
                    },
                    onnext: move |_| {
                        if let Some(word) = state.write().word.as_mut() {
                            word.cursor.next();
                        }
                    },
                }

                div { style: "text-align: center; margin-top: 8px;",
                    ConvertButton {
                        disabled: false,
                        onclick: move |_| {
                            use crate::pages::widgets::failure_message;

                            let session = state.read().word.clone();
                            let Some(session) = session else { return };

                            if let Some(out) = rfd::FileDialog::new()
                                .add_filter("PDF Files", &["pdf"])
                                .set_file_name("converted.pdf")
                                .save_file()
                            {
                                let paper = state.read().config.paper_size;
                                let mut writer = PdfWriter::new(paper);
                                writer.set_title(session.file_name.as_str());
                                match writer.write_paragraphs_to_file(&session.paragraphs, &out) {
                                    Ok(()) => {
                                        tracing::info!(output = %out.display(), "Word conversion complete");
                                        state.write().status_message =
                                            Some("Word file converted to PDF successfully!".into());
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
