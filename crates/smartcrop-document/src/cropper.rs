// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart cropper — rasterize page 1, measure its blank bottom/right margins,
// and shrink every page's media and crop boxes by what exceeds the padding.
//
// Cropping is best-effort: when the page cannot be rendered, or the PDF cannot
// be read back after rendering, the pass is skipped and the output is left
// alone. Only a failure to write a computed crop is reported as an error.

use std::path::{Path, PathBuf};

use smartcrop_core::error::{Result, SmartCropError};
use smartcrop_core::{CropConfig, CropOutcome, Edge, SAMPLING_DPI, SkipReason};
use tracing::{info, instrument, warn};

use crate::crop::plan_crop;
use crate::pdf::PageBoxDocument;
use crate::render::{PopplerRasterizer, Rasterizer};
use crate::scan::{PixelClassifier, scan_margins};
use crate::scratch::ScratchDir;

/// Applies one global crop plan, measured on the first page, to a PDF.
pub struct SmartCropper<R = PopplerRasterizer> {
    config: CropConfig,
    rasterizer: R,
    /// Where to write the annotated scan image, if anywhere.
    debug_image: Option<PathBuf>,
}

impl SmartCropper<PopplerRasterizer> {
    /// Cropper using `pdftocairo` from `PATH`.
    pub fn new(config: CropConfig) -> Self {
        Self::with_rasterizer(config, PopplerRasterizer::default())
    }
}

impl<R: Rasterizer> SmartCropper<R> {
    pub fn with_rasterizer(config: CropConfig, rasterizer: R) -> Self {
        Self {
            config,
            rasterizer,
            debug_image: None,
        }
    }

    /// Also save the scanned page, with the strips to be removed shaded, to
    /// `path`.
    pub fn debug_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_image = Some(path.into());
        self
    }

    /// Run one crop pass from `input` to `output` using `scratch` for
    /// intermediate files.
    ///
    /// `input` and `output` may be the same path. On any `Skipped` outcome the
    /// output file is not touched.
    #[instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
    pub fn crop(&self, input: &Path, output: &Path, scratch: &ScratchDir) -> Result<CropOutcome> {
        self.config.validate()?;

        let page = match self.rasterizer.rasterize_first_page(input, scratch.path()) {
            Ok(page) => page,
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Could not rasterize page for smart crop, leaving PDF as is");
                return Ok(CropOutcome::Skipped(skip_reason(err)));
            }
            Err(err) => return Err(err),
        };

        let classifier = PixelClassifier::from_config(&self.config);
        let margins = scan_margins(&page.to_rgba(), &classifier);
        let plan = plan_crop(&margins, &self.config, SAMPLING_DPI);

        info!(
            width = page.width(),
            height = page.height(),
            raw_bottom = margins.bottom,
            raw_right = margins.right,
            bottom_padding = self.config.padding(Edge::Bottom),
            right_padding = self.config.padding(Edge::Right),
            bottom_pixels = plan.bottom_pixels,
            right_pixels = plan.right_pixels,
            "Margins measured"
        );

        if let Some(path) = &self.debug_image {
            if let Err(err) = page.mark_crop(&plan).save(path) {
                warn!(error = %err, "Could not write debug scan image");
            }
        }

        if plan.is_empty() {
            info!("No blank margin beyond padding, nothing to crop");
            return Ok(CropOutcome::Skipped(SkipReason::NothingToCrop));
        }

        let mut document = match PageBoxDocument::open(input) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "Rendered page but could not parse PDF, leaving it as is");
                return Ok(CropOutcome::Skipped(SkipReason::UnreadableDocument(
                    err.to_string(),
                )));
            }
        };
        let pages = match document.apply(&plan) {
            Ok(pages) => pages,
            Err(err) => {
                warn!(error = %err, "Could not read page boxes, leaving PDF as is");
                return Ok(CropOutcome::Skipped(SkipReason::UnreadableDocument(
                    err.to_string(),
                )));
            }
        };
        document.save(output)?;

        info!(
            pages = pages.len(),
            bottom_points = plan.bottom_units,
            right_points = plan.right_units,
            "Smart cropped PDF saved"
        );
        Ok(CropOutcome::Cropped { plan, pages })
    }

    /// [`SmartCropper::crop`] with a scratch directory of its own.
    pub fn crop_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CropOutcome> {
        let scratch = ScratchDir::new()?;
        self.crop(input.as_ref(), output.as_ref(), &scratch)
    }
}

fn skip_reason(err: SmartCropError) -> SkipReason {
    match err {
        SmartCropError::EmptyRasterOutput => SkipReason::EmptyRasterOutput,
        other => SkipReason::RasterizationUnavailable(other.to_string()),
    }
}

/// Trim blank bottom and right margins from `input`, writing to `output`.
///
/// Paddings are in pixels at [`SAMPLING_DPI`]. Returns `Ok(())` when the crop
/// was skipped because the page could not be rendered or had nothing to trim;
/// in that case `output` is left untouched.
pub fn smart_crop(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    bottom_padding_pixels: u32,
    right_padding_pixels: u32,
) -> Result<()> {
    smart_crop_with(
        PopplerRasterizer::default(),
        input,
        output,
        bottom_padding_pixels,
        right_padding_pixels,
    )?;
    Ok(())
}

/// [`smart_crop`] with a caller-chosen rasterizer, returning the outcome.
pub fn smart_crop_with<R: Rasterizer>(
    rasterizer: R,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    bottom_padding_pixels: u32,
    right_padding_pixels: u32,
) -> Result<CropOutcome> {
    let config = CropConfig::default()
        .with_padding(Edge::Bottom, bottom_padding_pixels)
        .with_padding(Edge::Right, right_padding_pixels);
    SmartCropper::with_rasterizer(config, rasterizer).crop_file(input, output)
}
