// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rasterization — render the first page of a PDF to an in-memory image.
//
// The default backend shells out to poppler's `pdftocairo`. Everything is
// rendered at `SAMPLING_DPI`, the same constant the crop planner converts
// pixels with.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use smartcrop_core::SAMPLING_DPI;
use smartcrop_core::error::{Result, SmartCropError};
use tracing::{debug, instrument, warn};

use crate::image::PageImage;

/// Default rasterizer executable.
pub const DEFAULT_RASTERIZER: &str = "pdftocairo";

/// Renders the first page of a PDF at [`SAMPLING_DPI`].
pub trait Rasterizer {
    /// Render page 1 of `pdf`. Intermediate files go into `scratch`.
    ///
    /// Fails with [`SmartCropError::RasterizationUnavailable`] when the
    /// backend cannot run or rejects the file, and with
    /// [`SmartCropError::EmptyRasterOutput`] when it produced no image.
    fn rasterize_first_page(&self, pdf: &Path, scratch: &Path) -> Result<PageImage>;
}

/// `pdftocairo`-backed rasterizer.
#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    program: PathBuf,
    transparent: bool,
}

impl Default for PopplerRasterizer {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_RASTERIZER),
            transparent: true,
        }
    }
}

impl PopplerRasterizer {
    /// Use a specific `pdftocairo` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Render with a transparent background (`-transp`) instead of white.
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }
}

impl Rasterizer for PopplerRasterizer {
    #[instrument(skip_all, fields(pdf = %pdf.display(), program = %self.program.display()))]
    fn rasterize_first_page(&self, pdf: &Path, scratch: &Path) -> Result<PageImage> {
        let stem = scratch.join("page");
        let dpi = SAMPLING_DPI.to_string();

        let mut command = Command::new(&self.program);
        command.args(["-png", "-singlefile", "-r", &dpi, "-f", "1", "-l", "1"]);
        if self.transparent {
            command.arg("-transp");
        }
        command.arg(pdf).arg(&stem);

        let output = command.output().map_err(|err| {
            let reason = if err.kind() == ErrorKind::NotFound {
                format!("{} not found", self.program.display())
            } else {
                format!("cannot run {}: {}", self.program.display(), err)
            };
            SmartCropError::RasterizationUnavailable(reason)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "Rasterizer failed");
            return Err(SmartCropError::RasterizationUnavailable(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let png_path = stem.with_extension("png");
        if !png_path.exists() {
            return Err(SmartCropError::EmptyRasterOutput);
        }

        let page = PageImage::open(&png_path)
            .map_err(|err| SmartCropError::RasterizationUnavailable(err.to_string()))?;
        debug!(width = page.width(), height = page.height(), "Page rasterized");
        Ok(page)
    }
}

/// Render page 1 of `pdf` as PNG bytes on a white background.
#[instrument(skip_all, fields(pdf = %pdf.display()))]
pub fn render_png<R: Rasterizer + ?Sized>(
    rasterizer: &R,
    pdf: &Path,
    scratch: &Path,
) -> Result<Vec<u8>> {
    rasterizer
        .rasterize_first_page(pdf, scratch)?
        .flatten_onto_white()
        .to_png_bytes()
}
