// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — loading, aspect-fit scaling, and preview encoding.

pub mod loader;

pub use loader::LoadedImage;
