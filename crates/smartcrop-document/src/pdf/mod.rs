// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — reading page boxes, rewriting them, and saving the result.

pub mod boxes;
pub mod reader;
pub mod writer;

pub use boxes::rewrite_box;
pub use reader::PageBoxDocument;
