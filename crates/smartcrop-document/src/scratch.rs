// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request-scoped scratch directories.
//
// Every crop pass writes its intermediate files (rendered page, debug dump)
// into its own directory, which is removed when the handle is dropped.

use std::path::{Path, PathBuf};

use smartcrop_core::error::Result;
use tempfile::TempDir;
use tracing::debug;

/// Exclusively owned temporary directory for one crop pass.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp location.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("smartcrop-").tempdir()?;
        debug!(path = %dir.path().display(), "Scratch directory created");
        Ok(Self { dir })
    }

    /// Create a fresh directory under `parent`.
    pub fn new_in(parent: impl AsRef<Path>) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("smartcrop-")
            .tempdir_in(parent)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the scratch directory.
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }
}
