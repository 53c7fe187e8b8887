// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page box access — open a PDF with `lopdf`, read each page's media and crop
// boxes, and rewrite them in place.

use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use smartcrop_core::error::{Result, SmartCropError};
use smartcrop_core::{CropPlan, PageBox, PageBoxes};
use tracing::{debug, info, instrument, warn};

use super::boxes::{parse_rect, rect_object, rewrite_boxes};

/// Upper bound on `/Parent` hops when resolving inherited attributes.
const MAX_INHERITANCE_DEPTH: usize = 64;

/// US Letter, used when a page tree carries no `/MediaBox` at all.
const FALLBACK_MEDIA_BOX: [f64; 4] = [0.0, 0.0, 612.0, 792.0];

/// A loaded PDF whose page boxes can be read and rewritten.
///
/// The whole document lives in memory, so saving over the file it was opened
/// from is safe.
pub struct PageBoxDocument {
    /// The underlying lopdf document.
    pub(crate) document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PageBoxDocument {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        let document = Document::load(path_ref).map_err(|err| {
            SmartCropError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Load a PDF already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SmartCropError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the document was created via [`PageBoxDocument::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Boxes of every page, keyed by 1-indexed page number, in page order.
    pub fn pages(&self) -> Result<Vec<(u32, PageBoxes)>> {
        self.document
            .get_pages()
            .into_iter()
            .map(|(number, page_id)| Ok((number, self.boxes_of(page_id)?)))
            .collect()
    }

    /// Boxes of a single page (1-indexed).
    pub fn page_boxes(&self, page_number: u32) -> Result<PageBoxes> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            SmartCropError::PdfError(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;
        self.boxes_of(page_id)
    }

    // -- Rewriting ------------------------------------------------------------

    /// Apply one crop plan to every page, writing identical `/MediaBox` and
    /// `/CropBox` entries on each page dictionary.
    ///
    /// Returns the new boxes in page order. Nothing touches disk until the
    /// document is saved.
    #[instrument(skip_all, fields(bottom_points = plan.bottom_units, right_points = plan.right_units))]
    pub fn apply(&mut self, plan: &CropPlan) -> Result<Vec<PageBoxes>> {
        let rewritten = self
            .document
            .get_pages()
            .into_values()
            .map(|page_id| Ok((page_id, rewrite_boxes(self.boxes_of(page_id)?, plan))))
            .collect::<Result<Vec<(ObjectId, PageBoxes)>>>()?;

        for (page_id, boxes) in &rewritten {
            let page = self
                .document
                .get_object_mut(*page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| {
                    SmartCropError::PdfError(format!("page {:?} is not writable: {}", page_id, err))
                })?;
            page.set("MediaBox", rect_object(&boxes.media_box));
            page.set("CropBox", rect_object(&boxes.crop_box));
        }

        info!(pages = rewritten.len(), "Page boxes rewritten");
        Ok(rewritten.into_iter().map(|(_, boxes)| boxes).collect())
    }

    // -- Helpers --------------------------------------------------------------

    fn boxes_of(&self, page_id: ObjectId) -> Result<PageBoxes> {
        let media_box = match self.inherited(page_id, b"MediaBox")? {
            Some(obj) => parse_rect(&self.document, obj)?,
            None => {
                warn!(?page_id, "Page has no /MediaBox, assuming US Letter");
                PageBox::from_array(FALLBACK_MEDIA_BOX)
            }
        };
        let crop_box = match self.inherited(page_id, b"CropBox")? {
            Some(obj) => parse_rect(&self.document, obj)?,
            None => media_box,
        };
        Ok(PageBoxes {
            media_box,
            crop_box,
        })
    }

    /// Look up an inheritable page attribute on the page or its ancestors.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Result<Option<&Object>> {
        let mut node = self
            .document
            .get_object(page_id)
            .and_then(Object::as_dict)
            .map_err(|err| {
                SmartCropError::PdfError(format!("cannot read page {:?}: {}", page_id, err))
            })?;

        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Ok(Some(value));
            }
            let parent = match node.get(b"Parent").and_then(Object::as_reference) {
                Ok(id) => id,
                Err(_) => return Ok(None),
            };
            node = match self.document.get_object(parent).and_then(Object::as_dict) {
                Ok(dict) => dict,
                Err(_) => return Ok(None),
            };
        }

        warn!(?page_id, "Page tree deeper than expected, giving up inheritance lookup");
        Ok(None)
    }
}
