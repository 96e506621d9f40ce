// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small shared UI pieces used by every conversion page.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dioxus::prelude::*;

use pagesmith_core::PagesmithError;
use pagesmith_core::human_errors::humanize_error;

/// Inline a PNG as a data URI for an `img` element.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// One status line per failed action: plain message plus suggestion.
pub fn failure_message(err: &PagesmithError) -> String {
    let human = humanize_error(err);
    format!("{} {}", human.message, human.suggestion)
}

/// Full-width primary button (file pickers, convert actions).
#[component]
pub fn PrimaryButton(
    label: &'static str,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    rsx! {
        button {
            style: "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 16px; margin: 8px 0; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

/// Green convert button, visually distinct from the pickers.
#[component]
pub fn ConvertButton(disabled: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    rsx! {
        button {
            style: "padding: 12px 32px; border-radius: 8px; border: none; background: #28a745; color: white; font-size: 16px; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "Convert"
        }
    }
}

/// Previous/next pager with a "Page x/y" label in the middle.
#[component]
pub fn Pager(
    label: String,
    at_start: bool,
    at_end: bool,
    onprev: EventHandler<MouseEvent>,
    onnext: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; margin: 8px 0;",
            PagerButton { label: "← Previous", disabled: at_start, onclick: move |evt| onprev.call(evt) }
            span { style: "color: #666; font-size: 14px;", "{label}" }
            PagerButton { label: "Next →", disabled: at_end, onclick: move |evt| onnext.call(evt) }
        }
    }
}

#[component]
fn PagerButton(
    label: &'static str,
    disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    let visibility = if disabled { "hidden" } else { "visible" };
    rsx! {
        button {
            style: "padding: 8px 12px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 14px; visibility: {visibility};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

/// Status line shown under each page's controls.
#[component]
pub fn StatusLine(message: Option<String>) -> Element {
    rsx! {
        if let Some(ref msg) = message {
            p { style: "margin-top: 8px; color: #666; font-size: 14px; text-align: center;",
                "{msg}"
            }
        }
    }
}
