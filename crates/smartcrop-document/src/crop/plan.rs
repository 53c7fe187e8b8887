// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop planning — padding subtraction and pixel-to-point conversion.

use smartcrop_core::{CropConfig, CropPlan, Edge, POINTS_PER_INCH};
use tracing::debug;

use crate::scan::BlankMargins;

/// Blank pixels left to remove once `padding` pixels of margin are kept.
/// Never negative.
pub fn adjusted_crop(raw_blank_pixels: u32, padding_pixels: u32) -> u32 {
    raw_blank_pixels.saturating_sub(padding_pixels)
}

/// Convert a pixel count sampled at `dpi` into PDF points.
pub fn pixels_to_points(pixels: u32, dpi: u32) -> f64 {
    f64::from(pixels) * POINTS_PER_INCH / f64::from(dpi)
}

/// Build the crop plan for one rendered sample.
///
/// Edges not enabled in `config` get a zero crop. `dpi` must be the density the
/// sample was rendered at.
pub fn plan_crop(margins: &BlankMargins, config: &CropConfig, dpi: u32) -> CropPlan {
    let pixels_for = |edge: Edge| {
        config
            .padding(edge)
            .map(|padding| adjusted_crop(margins.get(edge), padding))
            .unwrap_or(0)
    };

    let bottom_pixels = pixels_for(Edge::Bottom);
    let right_pixels = pixels_for(Edge::Right);
    let plan = CropPlan {
        bottom_pixels,
        right_pixels,
        bottom_units: pixels_to_points(bottom_pixels, dpi),
        right_units: pixels_to_points(right_pixels, dpi),
    };

    debug!(
        raw_bottom = margins.bottom,
        raw_right = margins.right,
        bottom_pixels,
        right_pixels,
        bottom_points = plan.bottom_units,
        right_points = plan.right_units,
        "Crop plan computed"
    );
    plan
}
