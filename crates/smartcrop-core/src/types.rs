// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for whitespace-aware page cropping.

use serde::{Deserialize, Serialize};

/// A page edge that the cropper can trim.
///
/// Only the bottom and right margins are ever removed; the top-left corner of
/// a rendered diagram is its anchor and stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Bottom,
    Right,
}

impl Edge {
    /// Every croppable edge, in scan order.
    pub const ALL: [Edge; 2] = [Edge::Bottom, Edge::Right];
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bottom => write!(f, "bottom"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// Axis-aligned rectangle in PDF user-space units (points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBox {
    pub lower_left: (f64, f64),
    pub upper_right: (f64, f64),
}

impl PageBox {
    pub fn new(lower_left: (f64, f64), upper_right: (f64, f64)) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Build a box from a PDF rectangle array `[x1 y1 x2 y2]`.
    ///
    /// PDF allows any two opposite corners, so the coordinates are normalised
    /// so that `lower_left` really is the lower-left corner.
    pub fn from_array(rect: [f64; 4]) -> Self {
        let [x1, y1, x2, y2] = rect;
        Self {
            lower_left: (x1.min(x2), y1.min(y2)),
            upper_right: (x1.max(x2), y1.max(y2)),
        }
    }

    /// The box as a PDF rectangle array `[llx lly urx ury]`.
    pub fn to_array(&self) -> [f64; 4] {
        [
            self.lower_left.0,
            self.lower_left.1,
            self.upper_right.0,
            self.upper_right.1,
        ]
    }

    pub fn width(&self) -> f64 {
        self.upper_right.0 - self.lower_left.0
    }

    pub fn height(&self) -> f64 {
        self.upper_right.1 - self.lower_left.1
    }
}

/// The two boxes of a single page that the cropper keeps in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageBoxes {
    /// Intended physical sheet.
    pub media_box: PageBox,
    /// Visible viewport. Defaults to the media box when the page has none.
    pub crop_box: PageBox,
}

/// How much to remove from each edge, in raster pixels and in page units.
///
/// All four amounts are non-negative. Edges that are not enabled in the
/// configuration carry zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropPlan {
    pub bottom_pixels: u32,
    pub right_pixels: u32,
    pub bottom_units: f64,
    pub right_units: f64,
}

impl CropPlan {
    /// True when neither edge needs trimming.
    pub fn is_empty(&self) -> bool {
        self.bottom_pixels == 0 && self.right_pixels == 0
    }

    /// Pixel amount for one edge.
    pub fn pixels(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Bottom => self.bottom_pixels,
            Edge::Right => self.right_pixels,
        }
    }

    /// Page-unit amount for one edge.
    pub fn units(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Bottom => self.bottom_units,
            Edge::Right => self.right_units,
        }
    }
}

/// Why a crop pass left the output untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The rasterizer could not render the first page.
    RasterizationUnavailable(String),
    /// The rasterizer ran but produced no page image.
    EmptyRasterOutput,
    /// Every enabled edge had no blank margin beyond its padding.
    NothingToCrop,
    /// The page rendered, but its page tree could not be read back.
    UnreadableDocument(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RasterizationUnavailable(msg) => write!(f, "rasterization unavailable: {}", msg),
            Self::EmptyRasterOutput => write!(f, "rasterizer produced no page image"),
            Self::NothingToCrop => write!(f, "no blank margin beyond padding"),
            Self::UnreadableDocument(msg) => write!(f, "unreadable document: {}", msg),
        }
    }
}

/// Result of one crop pass that did not fail outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CropOutcome {
    /// The plan was applied and the output written.
    Cropped {
        plan: CropPlan,
        /// New boxes for every page, in page order.
        pages: Vec<PageBoxes>,
    },
    /// No rewrite happened; the output artifact was not touched.
    Skipped(SkipReason),
}

impl CropOutcome {
    pub fn is_cropped(&self) -> bool {
        matches!(self, Self::Cropped { .. })
    }
}
