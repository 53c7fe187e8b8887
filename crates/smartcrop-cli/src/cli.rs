// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trim blank bottom and right margins from rendered diagram PDFs.
#[derive(Debug, Parser)]
#[command(name = "smartcrop", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Crop the blank bottom/right margin of every page
    Crop {
        /// PDF to crop
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Where to write the result. Default: overwrite FILE
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Blank pixels (at 300 DPI) to keep below the drawing
        #[arg(long, value_name = "PX")]
        bottom_padding: Option<u32>,

        /// Blank pixels (at 300 DPI) to keep right of the drawing
        #[arg(long, value_name = "PX", conflicts_with = "bottom_only")]
        right_padding: Option<u32>,

        /// Only crop the bottom edge
        #[arg(long)]
        bottom_only: bool,

        /// JSON crop configuration file
        #[arg(long, value_name = "JSON")]
        config: Option<PathBuf>,

        /// Save the scanned page with the removed strips shaded
        #[arg(long, value_name = "PNG")]
        debug_image: Option<PathBuf>,

        /// pdftocairo executable to rasterize with
        #[arg(long, value_name = "BIN")]
        rasterizer: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the first page to PNG at 300 DPI
    Png {
        /// PDF to render
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// PNG file to write
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// pdftocairo executable to rasterize with
        #[arg(long, value_name = "BIN")]
        rasterizer: Option<PathBuf>,
    },
}
