// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// smartcrop-document — Whitespace-aware cropping of rendered PDFs.
//
// Rasterizes the first page, counts the blank rows at the bottom and blank
// columns at the right, keeps a configurable padding, and moves every page's
// media and crop boxes in by the remainder.

pub mod crop;
pub mod cropper;
pub mod image;
pub mod pdf;
pub mod render;
pub mod scan;
pub mod scratch;

// Re-export the primary items so callers can use `smartcrop_document::SmartCropper` etc.
pub use cropper::{SmartCropper, smart_crop, smart_crop_with};
pub use crate::image::processor::PageImage;
pub use pdf::reader::PageBoxDocument;
pub use render::{PopplerRasterizer, Rasterizer, render_png};
pub use scan::margins::{BlankMargins, PixelClassifier, scan_blank_margin, scan_margins};
pub use scratch::ScratchDir;
