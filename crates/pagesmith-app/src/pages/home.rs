// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — pick one of the three conversion modes.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            h1 { "Pagesmith" }
            p { style: "color: #666;", "Convert documents and images to PDF, or crop pages out of one." }

            div { style: "display: grid; grid-template-columns: 1fr; gap: 12px; margin: 24px 0; max-width: 420px;",
                ModeCard {
                    to: Route::Word {},
                    title: "Word → PDF",
                    detail: "Transcribe a .docx as plain text pages.",
                }
                ModeCard {
                    to: Route::Images {},
                    title: "Images → PDF",
                    detail: "Combine images into one PDF, one page each, in your order.",
                }
                ModeCard {
                    to: Route::Crop {},
                    title: "Crop PDF",
                    detail: "Keep a page range from an existing PDF.",
                }
            }
        }
    }
}

#[component]
fn ModeCard(to: Route, title: &'static str, detail: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: block; padding: 16px; border: 1px solid #e0e0e0; border-radius: 12px; text-decoration: none; color: #333; background: white;",
            div { style: "font-size: 18px; font-weight: 600;", "{title}" }
            div { style: "font-size: 14px; color: #666; margin-top: 4px;", "{detail}" }
        }
    }
}
