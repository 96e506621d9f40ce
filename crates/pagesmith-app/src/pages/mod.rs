// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod crop;
pub mod home;
pub mod images;
pub mod word;

pub(crate) mod widgets;
