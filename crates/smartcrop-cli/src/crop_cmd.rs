// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `smartcrop crop` — one best-effort crop pass.

use std::path::{Path, PathBuf};

use smartcrop_core::error::Result;
use smartcrop_core::{CropConfig, CropOutcome, Edge};
use smartcrop_document::{PopplerRasterizer, SmartCropper};

pub struct CropArgs<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub bottom_padding: Option<u32>,
    pub right_padding: Option<u32>,
    pub bottom_only: bool,
    pub config: Option<&'a Path>,
    pub debug_image: Option<&'a Path>,
    pub rasterizer: Option<&'a Path>,
    pub json: bool,
}

pub fn run(args: &CropArgs<'_>) -> Result<()> {
    let config = build_config(args)?;

    let rasterizer = args
        .rasterizer
        .map(PopplerRasterizer::with_program)
        .unwrap_or_default();
    let mut cropper = SmartCropper::with_rasterizer(config, rasterizer);
    if let Some(path) = args.debug_image {
        cropper = cropper.debug_image(path);
    }

    let output: PathBuf = args.output.unwrap_or(args.input).to_path_buf();
    let outcome = cropper.crop_file(args.input, &output)?;

    if args.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", describe(&outcome));
    }
    Ok(())
}

/// Config file (or defaults), then command-line overrides.
fn build_config(args: &CropArgs<'_>) -> Result<CropConfig> {
    let mut config = match args.config {
        Some(path) => CropConfig::load(path)?,
        None => CropConfig::default(),
    };
    if args.bottom_only {
        config = config.without_edge(Edge::Right);
    }
    if let Some(px) = args.bottom_padding {
        config = config.with_padding(Edge::Bottom, px);
    }
    if let Some(px) = args.right_padding {
        config = config.with_padding(Edge::Right, px);
    }
    config.validate()?;
    Ok(config)
}

fn describe(outcome: &CropOutcome) -> String {
    match outcome {
        CropOutcome::Cropped { plan, pages } => format!(
            "cropped {} page(s): bottom {} px ({:.2} pt), right {} px ({:.2} pt)",
            pages.len(),
            plan.bottom_pixels,
            plan.bottom_units,
            plan.right_pixels,
            plan.right_units
        ),
        CropOutcome::Skipped(reason) => format!("skipped: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcrop_core::{CropPlan, SkipReason};

    fn args(input: &Path) -> CropArgs<'_> {
        CropArgs {
            input,
            output: None,
            bottom_padding: None,
            right_padding: None,
            bottom_only: false,
            config: None,
            debug_image: None,
            rasterizer: None,
            json: false,
        }
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let mut a = args(Path::new("in.pdf"));
        a.bottom_padding = Some(10);
        let config = build_config(&a).unwrap();
        assert_eq!(config.padding(Edge::Bottom), Some(10));
        assert_eq!(config.padding(Edge::Right), Some(100));
    }

    #[test]
    fn bottom_only_drops_right_edge() {
        let mut a = args(Path::new("in.pdf"));
        a.bottom_only = true;
        let config = build_config(&a).unwrap();
        assert!(!config.is_enabled(Edge::Right));
        assert_eq!(config.padding(Edge::Bottom), Some(120));
    }

    #[test]
    fn describes_outcomes() {
        let cropped = CropOutcome::Cropped {
            plan: CropPlan {
                bottom_pixels: 250,
                right_pixels: 0,
                bottom_units: 60.0,
                right_units: 0.0,
            },
            pages: Vec::new(),
        };
        assert_eq!(
            describe(&cropped),
            "cropped 0 page(s): bottom 250 px (60.00 pt), right 0 px (0.00 pt)"
        );
        assert_eq!(
            describe(&CropOutcome::Skipped(SkipReason::NothingToCrop)),
            "skipped: no blank margin beyond padding"
        );
    }
}
