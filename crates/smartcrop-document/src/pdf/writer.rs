// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF serialisation — write a rewritten document to bytes or to a file.
//
// File output goes through a temporary file in the destination directory that
// is renamed over the target, so a failed write never leaves a truncated PDF
// behind (including when the target is the file the document came from).
// The staged file takes the permissions of the file it replaces, or the
// default permissions of a freshly created file.

use std::fs::{self, OpenOptions, Permissions};
use std::io;
use std::path::Path;

use smartcrop_core::error::{Result, SmartCropError};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use super::reader::PageBoxDocument;

impl PageBoxDocument {
    /// Serialise the document into memory.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.document.save_to(&mut output).map_err(|err| {
            SmartCropError::SerializationFailure(format!("failed to serialise PDF: {}", err))
        })?;
        Ok(output)
    }

    /// Write the document to `path`, replacing any existing file atomically.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let failure = |what: &str, err: &dyn std::fmt::Display| {
            SmartCropError::SerializationFailure(format!(
                "{} for {}: {}",
                what,
                path.display(),
                err
            ))
        };

        let permissions =
            target_permissions(path).map_err(|err| failure("cannot stage output", &err))?;
        let mut staging =
            NamedTempFile::new_in(dir).map_err(|err| failure("cannot stage output", &err))?;
        self.document
            .save_to(&mut staging)
            .map_err(|err| failure("cannot serialise PDF", &err))?;
        staging
            .as_file()
            .set_permissions(permissions)
            .map_err(|err| failure("cannot set output permissions", &err))?;
        debug!(staging = %staging.path().display(), "PDF staged");

        staging
            .persist(path)
            .map_err(|err| failure("cannot replace output", &err.error))?;

        info!("Wrote PDF to {}", path.display());
        Ok(())
    }
}

/// Permissions the output should end up with.
///
/// An existing target keeps its own. For a new target, an empty placeholder is
/// created and removed again to pick up the process defaults.
fn target_permissions(path: &Path) -> io::Result<Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let placeholder = OpenOptions::new().write(true).create_new(true).open(path)?;
            let permissions = placeholder.metadata()?.permissions();
            drop(placeholder);
            fs::remove_file(path)?;
            Ok(permissions)
        }
        Err(err) => Err(err),
    }
}
