// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for smartcrop.

use thiserror::Error;

/// Top-level error type for all cropping operations.
#[derive(Debug, Error)]
pub enum SmartCropError {
    // -- Raster collaborator --
    #[error("rasterization unavailable: {0}")]
    RasterizationUnavailable(String),

    #[error("rasterizer produced no page image")]
    EmptyRasterOutput,

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("failed to write cropped PDF: {0}")]
    SerializationFailure(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SmartCropError {
    /// Whether the cropper treats this error as "no crop applied" rather than
    /// surfacing it to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RasterizationUnavailable(_) | Self::EmptyRasterOutput
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SmartCropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_raster_errors_are_recoverable() {
        assert!(SmartCropError::RasterizationUnavailable("no pdftocairo".into()).is_recoverable());
        assert!(SmartCropError::EmptyRasterOutput.is_recoverable());
        assert!(!SmartCropError::SerializationFailure("disk full".into()).is_recoverable());
        assert!(!SmartCropError::PdfError("bad xref".into()).is_recoverable());
    }
}
