// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan module — pixel classification and blank-margin detection on rendered
// pages.

pub mod margins;

pub use margins::{BlankMargins, PixelClass, PixelClassifier, scan_blank_margin, scan_margins};
