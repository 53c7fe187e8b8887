// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page image handling — decoding rendered pages, flattening transparent
// renders onto white, annotating detected crop lines, and PNG encoding.

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use smartcrop_core::CropPlan;
use smartcrop_core::error::{Result, SmartCropError};
use tracing::{debug, info, instrument};

/// Colour used to shade the region a crop plan would remove.
const CROP_SHADE: Rgba<u8> = Rgba([255, 0, 0, 96]);

/// A rendered page held in memory.
pub struct PageImage {
    image: DynamicImage,
}

impl PageImage {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            SmartCropError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Page image loaded");
        Ok(Self { image: img })
    }

    /// Decode an encoded image (PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data).map_err(|err| {
            SmartCropError::ImageError(format!("failed to decode image: {}", err))
        })?;
        debug!(width = img.width(), height = img.height(), "Page image decoded");
        Ok(Self { image: img })
    }

    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// RGBA view of the page, as the margin scanner consumes it.
    pub fn to_rgba(&self) -> RgbaImage {
        self.image.to_rgba8()
    }

    // -- Transformations -------------------------------------------------------

    /// Composite the page over an opaque white background.
    pub fn flatten_onto_white(self) -> Self {
        let rgba = self.image.to_rgba8();
        let mut canvas = RgbaImage::from_pixel(rgba.width(), rgba.height(), Rgba([255; 4]));
        image::imageops::overlay(&mut canvas, &rgba, 0, 0);
        Self {
            image: DynamicImage::ImageRgba8(canvas),
        }
    }

    /// Shade the bottom and right strips that `plan` would remove.
    ///
    /// Used for the optional debug dump; the strips are blended over the page
    /// so the remaining padding stays visible.
    pub fn mark_crop(self, plan: &CropPlan) -> Self {
        let base = self.flatten_onto_white().image.to_rgba8();
        let (width, height) = base.dimensions();
        let bottom = plan.bottom_pixels.min(height);
        let right = plan.right_pixels.min(width);

        let mut shade = RgbaImage::new(width, height);
        if bottom > 0 && width > 0 {
            draw_filled_rect_mut(
                &mut shade,
                Rect::at(0, (height - bottom) as i32).of_size(width, bottom),
                CROP_SHADE,
            );
        }
        if right > 0 && height > 0 {
            draw_filled_rect_mut(
                &mut shade,
                Rect::at((width - right) as i32, 0).of_size(right, height),
                CROP_SHADE,
            );
        }

        let mut marked = base;
        image::imageops::overlay(&mut marked, &shade, 0, 0);
        Self {
            image: DynamicImage::ImageRgba8(marked),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| SmartCropError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the extension.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.image.save(path.as_ref()).map_err(|err| {
            SmartCropError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}
