// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `smartcrop png` — render page 1 to a PNG file.

use std::path::Path;

use smartcrop_core::error::Result;
use smartcrop_document::{PopplerRasterizer, ScratchDir, render_png};
use tracing::info;

pub fn run(input: &Path, output: &Path, rasterizer: Option<&Path>) -> Result<()> {
    let rasterizer = rasterizer
        .map(PopplerRasterizer::with_program)
        .unwrap_or_default()
        .transparent(false);
    let scratch = ScratchDir::new()?;

    let png = render_png(&rasterizer, input, scratch.path())?;
    std::fs::write(output, &png)?;
    info!(bytes = png.len(), "Wrote PNG to {}", output.display());
    Ok(())
}
