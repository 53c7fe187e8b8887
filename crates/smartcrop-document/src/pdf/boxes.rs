// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page box rewriting and conversion between `PageBox` and PDF rectangle
// arrays.

use lopdf::{Document, Object};
use smartcrop_core::error::{Result, SmartCropError};
use smartcrop_core::{CropPlan, Edge, PageBox, PageBoxes};

/// Apply a crop plan to one box.
///
/// The bottom edge moves up by `plan.bottom_units` and the right edge moves
/// left by `plan.right_units`, each clamped at the opposite edge so the box
/// never inverts. The left and top edges are unchanged.
pub fn rewrite_box(page_box: PageBox, plan: &CropPlan) -> PageBox {
    let (llx, lly) = page_box.lower_left;
    let (urx, ury) = page_box.upper_right;

    let new_lly = (lly + plan.units(Edge::Bottom)).min(ury);
    let new_urx = (urx - plan.units(Edge::Right)).max(llx);

    PageBox::new((llx, new_lly), (new_urx, ury))
}

/// Apply a crop plan to both boxes of a page.
///
/// Both boxes end up identical: the new crop box is derived from the media
/// box, so it can never extend past it.
pub fn rewrite_boxes(boxes: PageBoxes, plan: &CropPlan) -> PageBoxes {
    let media_box = rewrite_box(boxes.media_box, plan);
    PageBoxes {
        media_box,
        crop_box: media_box,
    }
}

/// Parse a PDF rectangle, following an indirect reference if needed.
pub(crate) fn parse_rect(doc: &Document, obj: &Object) -> Result<PageBox> {
    let arr = match obj {
        Object::Array(a) => a,
        Object::Reference(id) => doc
            .get_object(*id)
            .and_then(Object::as_array)
            .map_err(|err| {
                SmartCropError::PdfError(format!("rectangle reference {:?}: {}", id, err))
            })?,
        _ => {
            return Err(SmartCropError::PdfError(
                "page box is not an array".to_string(),
            ));
        }
    };

    if arr.len() != 4 {
        return Err(SmartCropError::PdfError(format!(
            "page box has {} elements, expected 4",
            arr.len()
        )));
    }

    let mut values = [0.0f64; 4];
    for (slot, item) in values.iter_mut().zip(arr) {
        *slot = number(doc, item)?;
    }
    Ok(PageBox::from_array(values))
}

fn number(doc: &Document, obj: &Object) -> Result<f64> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(r) => Ok(f64::from(*r)),
        Object::Reference(id) => {
            let resolved = doc.get_object(*id).map_err(|err| {
                SmartCropError::PdfError(format!("cannot resolve {:?}: {}", id, err))
            })?;
            number(doc, resolved)
        }
        other => Err(SmartCropError::PdfError(format!(
            "expected number in page box, found {:?}",
            other
        ))),
    }
}

/// Encode a box as a PDF rectangle array.
///
/// Whole-point values are written as integers so they survive exactly. Other
/// values become PDF reals, which lopdf holds as `f32` (about seven
/// significant digits).
pub(crate) fn rect_object(page_box: &PageBox) -> Object {
    Object::Array(page_box.to_array().iter().map(|&v| number_object(v)).collect())
}

fn number_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}
