// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end crop passes with in-process rasterizers, so no poppler install is
// needed.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgba, RgbaImage};
use lopdf::{Document, Object, dictionary};
use smartcrop_core::error::{Result, SmartCropError};
use smartcrop_core::{CropConfig, CropOutcome, Edge, SAMPLING_DPI, SkipReason};
use smartcrop_document::{
    PageBoxDocument, PageImage, Rasterizer, ScratchDir, SmartCropper, smart_crop_with,
};

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn write_pdf(path: &Path, page_count: usize, media_box: [i64; 4]) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            Object::Reference(doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => media_box.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>(),
            }))
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).unwrap();
}

/// Always returns the same image.
struct FixedRaster(RgbaImage);

impl Rasterizer for FixedRaster {
    fn rasterize_first_page(&self, _pdf: &Path, _scratch: &Path) -> Result<PageImage> {
        Ok(PageImage::from_dynamic(DynamicImage::ImageRgba8(self.0.clone())))
    }
}

/// Always fails the way a missing backend does.
struct Unavailable;

impl Rasterizer for Unavailable {
    fn rasterize_first_page(&self, _pdf: &Path, _scratch: &Path) -> Result<PageImage> {
        Err(SmartCropError::RasterizationUnavailable(
            "pdftocairo not found".into(),
        ))
    }
}

/// Renders the actual crop box of page 1: ink fills the top-left corner up to
/// fixed distances (in points) from the top and left edges.
struct PageModel {
    ink_height_pt: f64,
    ink_width_pt: f64,
}

impl Rasterizer for PageModel {
    fn rasterize_first_page(&self, pdf: &Path, _scratch: &Path) -> Result<PageImage> {
        let crop_box = PageBoxDocument::open(pdf)?.page_boxes(1)?.crop_box;
        let scale = f64::from(SAMPLING_DPI) / 72.0;
        let width = (crop_box.width() * scale).round() as u32;
        let height = (crop_box.height() * scale).round() as u32;
        let ink_w = (self.ink_width_pt * scale).ceil() as u32;
        let ink_h = (self.ink_height_pt * scale).ceil() as u32;

        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        for y in 0..ink_h.min(height) {
            for x in 0..ink_w.min(width) {
                img.put_pixel(x, y, INK);
            }
        }
        Ok(PageImage::from_dynamic(DynamicImage::ImageRgba8(img)))
    }
}

fn workspace() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("diagram.pdf");
    (dir, pdf)
}

/// 600x1000 page image with 300 blank rows at the bottom and ink touching the
/// right edge.
fn bottom_margin_image() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(600, 1000, Rgba([255, 255, 255, 255]));
    img.put_pixel(599, 699, INK);
    img
}

#[test]
fn crops_bottom_margin_beyond_padding() {
    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()));
    let scratch = ScratchDir::new().unwrap();
    let outcome = cropper.crop(&pdf, &pdf, &scratch).unwrap();

    let CropOutcome::Cropped { plan, pages } = outcome else {
        panic!("expected the page to be cropped");
    };
    assert_eq!(plan.bottom_pixels, 250);
    assert_eq!(plan.right_pixels, 0);
    assert_eq!(plan.bottom_units, 60.0);
    assert_eq!(pages.len(), 1);

    let boxes = PageBoxDocument::open(&pdf).unwrap().page_boxes(1).unwrap();
    assert_eq!(boxes.media_box.to_array(), [0.0, 60.0, 200.0, 300.0]);
    assert_eq!(boxes.crop_box, boxes.media_box);
}

#[test]
fn one_plan_applies_to_every_page() {
    let (_dir, pdf) = workspace();
    let out = pdf.with_file_name("cropped.pdf");
    write_pdf(&pdf, 3, [0, 0, 200, 300]);

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()));
    let outcome = cropper.crop_file(&pdf, &out).unwrap();
    assert!(outcome.is_cropped());

    let pages = PageBoxDocument::open(&out).unwrap().pages().unwrap();
    assert_eq!(pages.len(), 3);
    for (_, boxes) in pages {
        assert_eq!(boxes.media_box.to_array(), [0.0, 60.0, 200.0, 300.0]);
    }
    // The source is untouched when writing elsewhere.
    let source = PageBoxDocument::open(&pdf).unwrap().page_boxes(1).unwrap();
    assert_eq!(source.media_box.to_array(), [0.0, 0.0, 200.0, 300.0]);
}

#[test]
fn crops_right_margin_and_clamps_huge_crops() {
    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 10, 10]);

    // Entirely blank page: both margins span the whole image.
    let blank = RgbaImage::from_pixel(1000, 1000, Rgba([255, 255, 255, 255]));
    let config = CropConfig::default()
        .with_padding(Edge::Bottom, 0)
        .with_padding(Edge::Right, 0);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(blank));
    cropper.crop_file(&pdf, &pdf).unwrap();

    let boxes = PageBoxDocument::open(&pdf).unwrap().page_boxes(1).unwrap();
    assert_eq!(boxes.media_box.lower_left, (0.0, 10.0));
    assert_eq!(boxes.media_box.upper_right, (0.0, 10.0));
}

#[test]
fn unavailable_rasterizer_leaves_output_untouched() {
    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);
    let before = std::fs::read(&pdf).unwrap();

    let cropper = SmartCropper::with_rasterizer(CropConfig::default(), Unavailable);
    let outcome = cropper.crop_file(&pdf, &pdf).unwrap();

    assert!(matches!(
        outcome,
        CropOutcome::Skipped(SkipReason::RasterizationUnavailable(_))
    ));
    assert_eq!(std::fs::read(&pdf).unwrap(), before);
}

#[test]
fn nothing_to_crop_does_not_create_output() {
    let (_dir, pdf) = workspace();
    let out = pdf.with_file_name("cropped.pdf");
    write_pdf(&pdf, 1, [0, 0, 200, 300]);

    // 50 blank rows, well inside the default 120 pixel padding.
    let mut img = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    img.put_pixel(99, 49, INK);
    let cropper = SmartCropper::with_rasterizer(CropConfig::default(), FixedRaster(img));
    let outcome = cropper.crop_file(&pdf, &out).unwrap();

    assert_eq!(outcome, CropOutcome::Skipped(SkipReason::NothingToCrop));
    assert!(!out.exists());
}

#[test]
fn write_failure_is_reported() {
    let (dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);
    let out = dir.path().join("missing").join("cropped.pdf");

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()));
    let err = cropper.crop_file(&pdf, &out).unwrap_err();

    assert!(matches!(err, SmartCropError::SerializationFailure(_)));
}

#[test]
fn second_pass_is_a_no_op() {
    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);

    let model = PageModel {
        ink_height_pt: 100.0,
        ink_width_pt: 50.0,
    };
    let cropper = SmartCropper::with_rasterizer(CropConfig::default(), model);

    let first = cropper.crop_file(&pdf, &pdf).unwrap();
    assert!(first.is_cropped());
    let after_first = std::fs::read(&pdf).unwrap();

    let second = cropper.crop_file(&pdf, &pdf).unwrap();
    assert_eq!(second, CropOutcome::Skipped(SkipReason::NothingToCrop));
    assert_eq!(std::fs::read(&pdf).unwrap(), after_first);
}

#[test]
fn debug_image_is_written_where_asked() {
    let (dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);
    let debug_path = dir.path().join("scan.png");

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()))
        .debug_image(&debug_path);
    cropper.crop_file(&pdf, &pdf).unwrap();

    let dumped = PageImage::open(&debug_path).unwrap();
    assert_eq!((dumped.width(), dumped.height()), (600, 1000));
}

#[cfg(unix)]
#[test]
fn in_place_crop_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);
    std::fs::set_permissions(&pdf, std::fs::Permissions::from_mode(0o644)).unwrap();

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()));
    assert!(cropper.crop_file(&pdf, &pdf).unwrap().is_cropped());

    let mode = std::fs::metadata(&pdf).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn smart_crop_forwards_each_padding_to_its_edge() {
    let (_dir, pdf) = workspace();
    write_pdf(&pdf, 1, [0, 0, 200, 300]);

    // 300 blank rows below the ink and 200 blank columns right of it.
    let mut img = RgbaImage::from_pixel(600, 1000, Rgba([255, 255, 255, 255]));
    img.put_pixel(399, 699, INK);

    let outcome = smart_crop_with(FixedRaster(img), &pdf, &pdf, 50, 0).unwrap();
    let CropOutcome::Cropped { plan, .. } = outcome else {
        panic!("expected the page to be cropped");
    };
    assert_eq!(plan.bottom_pixels, 250);
    assert_eq!(plan.right_pixels, 200);

    let boxes = PageBoxDocument::open(&pdf).unwrap().page_boxes(1).unwrap();
    assert_eq!(boxes.media_box.to_array(), [0.0, 60.0, 152.0, 300.0]);
}

#[test]
fn unparseable_pdf_after_render_is_skipped() {
    let (_dir, pdf) = workspace();
    std::fs::write(&pdf, b"not a pdf at all").unwrap();

    let config = CropConfig::default().with_padding(Edge::Bottom, 50);
    let cropper = SmartCropper::with_rasterizer(config, FixedRaster(bottom_margin_image()));
    let outcome = cropper.crop_file(&pdf, &pdf).unwrap();

    assert!(matches!(
        outcome,
        CropOutcome::Skipped(SkipReason::UnreadableDocument(_))
    ));
    assert_eq!(std::fs::read(&pdf).unwrap(), b"not a pdf at all");
}
