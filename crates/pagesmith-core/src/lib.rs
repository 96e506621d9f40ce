// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagesmith — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod ordering;
pub mod types;

pub use config::AppConfig;
pub use error::PagesmithError;
pub use ordering::{ImageOrder, PageCursor};
pub use types::*;
