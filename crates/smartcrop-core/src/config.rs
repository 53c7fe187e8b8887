// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop configuration and the resolution constants shared by the rasterizer and
// the unit converter.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SmartCropError};
use crate::types::Edge;

/// Resolution the first page is rasterized at for margin detection.
///
/// The rasterizer and the pixel-to-point conversion both read this constant;
/// a pixel count is only meaningful at the density it was sampled at.
pub const SAMPLING_DPI: u32 = 300;

/// PDF user-space units per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Default per-channel brightness above which a pixel counts as blank.
pub const DEFAULT_WHITE_THRESHOLD: u8 = 220;

/// Default bottom padding, in pixels at [`SAMPLING_DPI`].
pub const DEFAULT_BOTTOM_PADDING: u32 = 120;

/// Default right padding, in pixels at [`SAMPLING_DPI`].
pub const DEFAULT_RIGHT_PADDING: u32 = 100;

/// Which edges to crop and how much blank margin to leave on each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Enabled edges mapped to the padding (pixels) preserved on that edge.
    /// An edge missing from the map is never cropped.
    pub paddings: BTreeMap<Edge, u32>,
    /// A channel must be strictly brighter than this to count as blank.
    pub white_threshold: u8,
    /// Pixels with alpha at or below this are blank regardless of colour.
    pub alpha_threshold: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            paddings: BTreeMap::from([
                (Edge::Bottom, DEFAULT_BOTTOM_PADDING),
                (Edge::Right, DEFAULT_RIGHT_PADDING),
            ]),
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            alpha_threshold: 0,
        }
    }
}

impl CropConfig {
    /// Crop only the bottom edge, keeping `padding` pixels of margin.
    pub fn bottom_only(padding: u32) -> Self {
        Self {
            paddings: BTreeMap::from([(Edge::Bottom, padding)]),
            ..Self::default()
        }
    }

    /// Enable `edge` with the given padding (replacing any previous value).
    pub fn with_padding(mut self, edge: Edge, padding: u32) -> Self {
        self.paddings.insert(edge, padding);
        self
    }

    /// Disable cropping on `edge`.
    pub fn without_edge(mut self, edge: Edge) -> Self {
        self.paddings.remove(&edge);
        self
    }

    /// Padding for `edge`, or `None` if the edge is not cropped.
    pub fn padding(&self, edge: Edge) -> Option<u32> {
        self.paddings.get(&edge).copied()
    }

    pub fn is_enabled(&self, edge: Edge) -> bool {
        self.paddings.contains_key(&edge)
    }

    /// Reject settings under which no pixel could ever be blank.
    pub fn validate(&self) -> Result<()> {
        if self.white_threshold == u8::MAX {
            return Err(SmartCropError::Config(
                "white_threshold 255 leaves no channel value above it".into(),
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }
}
