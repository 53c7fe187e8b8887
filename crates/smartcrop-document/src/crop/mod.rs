// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crop module — turns detected blank margins into a crop plan in page units.

pub mod plan;

pub use plan::{adjusted_crop, pixels_to_points, plan_crop};
