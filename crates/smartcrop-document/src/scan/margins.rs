// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blank-margin detection — counts the consecutive all-blank rows at the bottom
// and all-blank columns at the right of a rendered page.

use image::{Rgba, RgbaImage};
use serde::Serialize;
use smartcrop_core::config::DEFAULT_WHITE_THRESHOLD;
use smartcrop_core::{CropConfig, Edge};
use tracing::{debug, instrument};

/// Classification of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelClass {
    Blank,
    Ink,
}

/// Decides whether a pixel is background or drawn content.
///
/// Pixels are composited over opaque white before the brightness test, so a
/// transparent background reads as blank whatever RGB it happens to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelClassifier {
    /// Every composited channel must exceed this for the pixel to be blank.
    pub white_threshold: u8,
    /// Alpha at or below this is blank outright.
    pub alpha_threshold: u8,
}

impl Default for PixelClassifier {
    fn default() -> Self {
        Self {
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            alpha_threshold: 0,
        }
    }
}

impl PixelClassifier {
    pub fn from_config(config: &CropConfig) -> Self {
        Self {
            white_threshold: config.white_threshold,
            alpha_threshold: config.alpha_threshold,
        }
    }

    pub fn classify(&self, pixel: Rgba<u8>) -> PixelClass {
        if self.is_blank(pixel) {
            PixelClass::Blank
        } else {
            PixelClass::Ink
        }
    }

    #[inline]
    pub fn is_blank(&self, pixel: Rgba<u8>) -> bool {
        let Rgba([r, g, b, a]) = pixel;
        if a <= self.alpha_threshold {
            return true;
        }
        [r, g, b]
            .into_iter()
            .all(|channel| over_white(channel, a) > self.white_threshold)
    }
}

/// Composite one channel over an opaque white background.
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let (c, a) = (channel as u32, alpha as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Blank-margin widths detected on one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BlankMargins {
    /// Consecutive blank rows counted upward from the last row.
    pub bottom: u32,
    /// Consecutive blank columns counted leftward from the last column.
    pub right: u32,
}

impl BlankMargins {
    pub fn get(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Bottom => self.bottom,
            Edge::Right => self.right,
        }
    }
}

/// Count the consecutive fully blank rows (for [`Edge::Bottom`]) or columns
/// (for [`Edge::Right`]) starting at that edge of `image`.
///
/// Returns the full height or width for an entirely blank image and 0 when the
/// outermost row or column already holds ink. Each row/column scan stops at
/// its first ink pixel.
pub fn scan_blank_margin(image: &RgbaImage, edge: Edge, classifier: &PixelClassifier) -> u32 {
    let (width, height) = image.dimensions();
    match edge {
        Edge::Bottom => (0..height)
            .rev()
            .take_while(|&y| (0..width).all(|x| classifier.is_blank(*image.get_pixel(x, y))))
            .count() as u32,
        Edge::Right => (0..width)
            .rev()
            .take_while(|&x| (0..height).all(|y| classifier.is_blank(*image.get_pixel(x, y))))
            .count() as u32,
    }
}

/// Scan both edges of the same sample.
#[instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub fn scan_margins(image: &RgbaImage, classifier: &PixelClassifier) -> BlankMargins {
    let margins = BlankMargins {
        bottom: scan_blank_margin(image, Edge::Bottom, classifier),
        right: scan_blank_margin(image, Edge::Right, classifier),
    };
    debug!(
        bottom = margins.bottom,
        right = margins.right,
        "Blank margins detected"
    );
    margins
}
